//! Hash adapter wrapping the external primitives behind the small set of
//! operations the signing engine consumes.
//!
//! The construction choices are frozen: the two masked compression
//! functions are SHA-256 over the XOR-masked input, the variable-length
//! hash is SHAKE256 with a 32-byte output, the 512-bit message digest and
//! randomizer PRF are BLAKE2b-512, and secret-key expansion is the
//! ChaCha12 keystream under a zero nonce. All operations are pure
//! functions of their inputs.

use crate::params::{HASH_BYTES, MSG_HASH_BYTES, SEED_BYTES};
use blake2_rfc::blake2b::Blake2b;
use chacha20::cipher::{generic_array::GenericArray, KeyIvInit, StreamCipher};
use chacha20::ChaCha12;
use sha2::{Digest, Sha256};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

/// Hashes an n-byte block XORed with an n-byte mask.
pub(crate) fn hash_n_n_mask(input: &[u8], mask: &[u8]) -> [u8; HASH_BYTES] {
    let mut buf = [0u8; HASH_BYTES];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = input[i] ^ mask[i];
    }
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&Sha256::digest(buf));
    out
}

/// Hashes a 2n-byte block XORed with a 2n-byte mask.
pub(crate) fn hash_2n_n_mask(input: &[u8], mask: &[u8]) -> [u8; HASH_BYTES] {
    let mut buf = [0u8; 2 * HASH_BYTES];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = input[i] ^ mask[i];
    }
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&Sha256::digest(buf));
    out
}

/// Variable-length hash with a 32-byte output.
pub(crate) fn varlen(input: &[u8]) -> [u8; HASH_BYTES] {
    let mut hasher = Shake256::default();
    hasher.update(input);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; HASH_BYTES];
    reader.read(&mut out);
    out
}

/// 512-bit digest of R || pk || message.
pub(crate) fn msg_hash(r: &[u8], pk: &[u8], message: &[u8]) -> [u8; MSG_HASH_BYTES] {
    let mut hasher = Blake2b::new(MSG_HASH_BYTES);
    hasher.update(r);
    hasher.update(pk);
    hasher.update(message);
    let mut out = [0u8; MSG_HASH_BYTES];
    out.copy_from_slice(hasher.finalize().as_bytes());
    out
}

/// 512-bit PRF of sk_rand_seed || message, the source of the leaf index
/// and the randomizer R.
pub(crate) fn prf_seed(sk_rand_seed: &[u8], message: &[u8]) -> [u8; MSG_HASH_BYTES] {
    let mut hasher = Blake2b::new(MSG_HASH_BYTES);
    hasher.update(sk_rand_seed);
    hasher.update(message);
    let mut out = [0u8; MSG_HASH_BYTES];
    out.copy_from_slice(hasher.finalize().as_bytes());
    out
}

/// Fills `out` with the ChaCha12 keystream keyed by `seed`.
pub(crate) fn prg(out: &mut [u8], seed: &[u8; SEED_BYTES]) {
    let nonce = [0u8; 12];
    let mut cipher = ChaCha12::new(
        GenericArray::from_slice(seed),
        GenericArray::from_slice(&nonce),
    );
    out.fill(0);
    cipher.apply_keystream(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_compression_depends_on_mask() {
        let input = [0x5au8; 2 * HASH_BYTES];
        let mask_a = [0u8; 2 * HASH_BYTES];
        let mask_b = [1u8; 2 * HASH_BYTES];
        assert_ne!(
            hash_2n_n_mask(&input, &mask_a),
            hash_2n_n_mask(&input, &mask_b)
        );
        assert_eq!(
            hash_2n_n_mask(&input, &mask_a),
            hash_2n_n_mask(&input, &mask_a)
        );
    }

    #[test]
    fn test_prg_is_deterministic() {
        let seed = [7u8; SEED_BYTES];
        let mut a = vec![0u8; 128];
        let mut b = vec![0xffu8; 128];
        prg(&mut a, &seed);
        prg(&mut b, &seed);
        assert_eq!(a, b);
        assert_ne!(a, vec![0u8; 128]);

        let mut c = vec![0u8; 128];
        prg(&mut c, &[8u8; SEED_BYTES]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_msg_hash_orders_inputs() {
        let a = msg_hash(b"r", b"pk", b"m");
        let b = msg_hash(b"p", b"kr", b"m");
        assert_ne!(a, b);
    }
}
