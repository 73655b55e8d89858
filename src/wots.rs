//! Winternitz one-time signatures over 32-byte digests.
//!
//! Each keypair covers [`WOTS_L`] hash chains of length [`WOTS_W`]. The
//! secret chain starting points are expanded from a 32-byte seed with the
//! keystream PRG; every chain step XORs the running value with the public
//! mask for that step before hashing. Signing reveals each chain at the
//! position given by the base-w digits of the message plus a checksum of
//! their complements; verification completes the chains and returns the
//! implied public key.
//!
//! A keypair must sign at most one message. The hypertree above is what
//! makes the overall scheme stateless, by pinning every instance to a
//! unique leaf address.

use crate::hash;
use crate::params::{
    HASH_BYTES, SEED_BYTES, WOTS_L, WOTS_L1, WOTS_L2, WOTS_LOG_W, WOTS_SIG_BYTES, WOTS_W,
};
use zeroize::Zeroize;

/// Walks a chain from position `start` for `steps` steps. The mask index
/// equals the absolute chain position, so a verifier resuming mid-chain
/// consumes exactly the masks the signer skipped.
fn gen_chain(input: &[u8], start: usize, steps: usize, masks: &[u8]) -> [u8; HASH_BYTES] {
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&input[..HASH_BYTES]);
    for i in start..start + steps {
        if i >= WOTS_W - 1 {
            break;
        }
        out = hash::hash_n_n_mask(&out, &masks[i * HASH_BYTES..(i + 1) * HASH_BYTES]);
    }
    out
}

/// Splits `msg` into base-w digits (low nibble of each byte first) and
/// appends the checksum of the digit complements, most significant
/// checksum digit first.
fn chain_lengths(msg: &[u8]) -> [usize; WOTS_L] {
    let mut lengths = [0usize; WOTS_L];
    for (i, length) in lengths.iter_mut().enumerate().take(WOTS_L1) {
        let byte = msg[i >> 1];
        *length = if i & 1 == 0 {
            (byte & 0xf) as usize
        } else {
            (byte >> 4) as usize
        };
    }

    let mut csum = 0usize;
    for &digit in lengths.iter().take(WOTS_L1) {
        csum += WOTS_W - 1 - digit;
    }
    for i in 0..WOTS_L2 {
        lengths[WOTS_L1 + i] = (csum >> (WOTS_LOG_W * (WOTS_L2 - 1 - i))) & (WOTS_W - 1);
    }

    lengths
}

/// Derives the public key for `seed` into `pk`: all chain endpoints,
/// concatenated.
pub(crate) fn pkgen(pk: &mut [u8], seed: &[u8; SEED_BYTES], masks: &[u8]) {
    debug_assert_eq!(pk.len(), WOTS_SIG_BYTES);
    let mut sk = [0u8; WOTS_SIG_BYTES];
    hash::prg(&mut sk, seed);
    for i in 0..WOTS_L {
        let end = gen_chain(
            &sk[i * HASH_BYTES..(i + 1) * HASH_BYTES],
            0,
            WOTS_W - 1,
            masks,
        );
        pk[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&end);
    }
    sk.zeroize();
}

/// Signs the 32-byte digest `msg`, emitting the intermediate chain values
/// into `sig`.
pub(crate) fn sign(sig: &mut [u8], msg: &[u8; HASH_BYTES], seed: &[u8; SEED_BYTES], masks: &[u8]) {
    debug_assert_eq!(sig.len(), WOTS_SIG_BYTES);
    let lengths = chain_lengths(msg);
    let mut sk = [0u8; WOTS_SIG_BYTES];
    hash::prg(&mut sk, seed);
    for i in 0..WOTS_L {
        let node = gen_chain(
            &sk[i * HASH_BYTES..(i + 1) * HASH_BYTES],
            0,
            lengths[i],
            masks,
        );
        sig[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&node);
    }
    sk.zeroize();
}

/// Completes each chain of `sig` to its endpoint, writing the implied
/// public key into `pk`. The result only matches the signer's public key
/// when `sig` was produced over the same `msg`.
pub(crate) fn verify(pk: &mut [u8], sig: &[u8], msg: &[u8; HASH_BYTES], masks: &[u8]) {
    debug_assert_eq!(pk.len(), WOTS_SIG_BYTES);
    let lengths = chain_lengths(msg);
    for i in 0..WOTS_L {
        let end = gen_chain(
            &sig[i * HASH_BYTES..(i + 1) * HASH_BYTES],
            lengths[i],
            WOTS_W - 1 - lengths[i],
            masks,
        );
        pk[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MASKS_BYTES;
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn test_masks() -> Vec<u8> {
        (0..MASKS_BYTES).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn test_sign_then_complete_matches_pk() {
        let mut seed = [0u8; SEED_BYTES];
        let mut msg = [0u8; HASH_BYTES];
        OsRng.fill_bytes(&mut seed);
        OsRng.fill_bytes(&mut msg);
        let masks = test_masks();

        let mut pk = [0u8; WOTS_SIG_BYTES];
        pkgen(&mut pk, &seed, &masks);

        let mut sig = [0u8; WOTS_SIG_BYTES];
        sign(&mut sig, &msg, &seed, &masks);

        let mut completed = [0u8; WOTS_SIG_BYTES];
        verify(&mut completed, &sig, &msg, &masks);
        assert_eq!(pk, completed);

        let mut fake_sig = sig;
        fake_sig[0] ^= 1;
        verify(&mut completed, &fake_sig, &msg, &masks);
        assert_ne!(pk, completed);

        let mut other_msg = msg;
        other_msg[HASH_BYTES - 1] ^= 0x80;
        verify(&mut completed, &sig, &other_msg, &masks);
        assert_ne!(pk, completed);
    }

    #[test]
    fn test_chain_lengths_checksum() {
        // All-zero digits complement to the maximum checksum 64 * 15 = 960,
        // whose big-endian base-16 digits are 3, 12, 0.
        let lengths = chain_lengths(&[0u8; HASH_BYTES]);
        assert!(lengths[..WOTS_L1].iter().all(|&d| d == 0));
        assert_eq!(&lengths[WOTS_L1..], &[3, 12, 0]);

        // All-0xff digits complement to zero.
        let lengths = chain_lengths(&[0xffu8; HASH_BYTES]);
        assert!(lengths[..WOTS_L1].iter().all(|&d| d == WOTS_W - 1));
        assert_eq!(&lengths[WOTS_L1..], &[0, 0, 0]);
    }

    #[test]
    fn test_digit_order_is_low_nibble_first() {
        let mut msg = [0u8; HASH_BYTES];
        msg[0] = 0x21;
        let lengths = chain_lengths(&msg);
        assert_eq!(lengths[0], 1);
        assert_eq!(lengths[1], 2);
    }
}
