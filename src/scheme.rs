//! The hypertree signing engine: key generation, signing, verification,
//! and opening of combined signed messages.
//!
//! A signature certifies a HORST instance through twelve height-5 WOTS+
//! subtrees. Signing derives a pseudorandom 60-bit leaf index and the
//! message randomizer `R` from the secret randomizer seed, signs the
//! message digest with the HORST instance at that leaf, then WOTS-signs
//! each subtree root with the parent subtree's leaf, ascending to the
//! public root. Verification replays the same walk from the signature
//! material alone and accepts only if the reconstructed root matches the
//! public one under a constant-time comparison.

use crate::address::LeafAddr;
use crate::error::{Error, Result};
use crate::hash;
use crate::horst;
use crate::params::{
    HASH_BYTES, HORST_SIG_BYTES, LEAF_IDX_BYTES, MASKS_BYTES, MSG_HASH_SEED_BYTES, N_LEVELS,
    PUBLIC_KEY_BYTES, SECRET_KEY_BYTES, SEED_BYTES, SIGNATURE_BYTES, SK_RAND_SEED_BYTES,
    SUBTREE_HEIGHT, TOTAL_TREE_HEIGHT, WOTS_SIG_BYTES,
};
use crate::subtree::{compute_authpath_wots, get_seed, l_tree, treehash, validate_authpath};
use crate::utils::{bytes_to_u64, u64_to_bytes};
use crate::wots;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serialization")]
use serde_big_array::BigArray;

/// A SPHINCS-256 public key: the shared mask vector followed by the
/// hypertree root. Read-only after key generation and safe to share
/// across threads.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PublicKey(
    #[cfg_attr(feature = "serialization", serde(with = "BigArray"))] [u8; PUBLIC_KEY_BYTES],
);

impl PublicKey {
    pub(crate) fn masks(&self) -> &[u8] {
        &self.0[..MASKS_BYTES]
    }

    pub(crate) fn root(&self) -> &[u8] {
        &self.0[MASKS_BYTES..]
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(data: &[u8]) -> Result<PublicKey> {
        if data.len() != PUBLIC_KEY_BYTES {
            Err(Error::BadLength(PUBLIC_KEY_BYTES, data.len()))
        } else {
            let mut array = [0u8; PUBLIC_KEY_BYTES];
            array.copy_from_slice(data);
            Ok(PublicKey(array))
        }
    }
}

/// A SPHINCS-256 secret key: the leaf-seed, a copy of the public masks,
/// and the randomizer seed. Wiped from memory when dropped.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SecretKey(
    #[cfg_attr(feature = "serialization", serde(with = "BigArray"))] [u8; SECRET_KEY_BYTES],
);

impl SecretKey {
    pub(crate) fn masks(&self) -> &[u8] {
        &self.0[SEED_BYTES..SEED_BYTES + MASKS_BYTES]
    }

    pub(crate) fn sk_rand(&self) -> &[u8] {
        &self.0[SECRET_KEY_BYTES - SK_RAND_SEED_BYTES..]
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;
    fn try_from(data: &[u8]) -> Result<SecretKey> {
        if data.len() != SECRET_KEY_BYTES {
            Err(Error::BadLength(SECRET_KEY_BYTES, data.len()))
        } else {
            let mut array = [0u8; SECRET_KEY_BYTES];
            array.copy_from_slice(data);
            Ok(SecretKey(array))
        }
    }
}

/// A SPHINCS-256 signature: `R`, the serialized leaf index, the HORST
/// signature, and one (WOTS+ signature, authentication path) pair per
/// subtree level, as one contiguous blob with no framing.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Signature(
    #[cfg_attr(feature = "serialization", serde(with = "BigArray"))] [u8; SIGNATURE_BYTES],
);

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(data: &[u8]) -> Result<Signature> {
        if data.len() != SIGNATURE_BYTES {
            Err(Error::BadLength(SIGNATURE_BYTES, data.len()))
        } else {
            let mut array = [0u8; SIGNATURE_BYTES];
            array.copy_from_slice(data);
            Ok(Signature(array))
        }
    }
}

/// Stateless SPHINCS-256 signing engine.
///
/// All operations are CPU-bound leaf computations without internal
/// suspension points. Independent signatures may be produced concurrently
/// as long as each call owns its key reference; no locking is performed.
pub struct Sphincs256;

impl Sphincs256 {
    /// Generates a keypair from `rng`, reading the randomness in a single
    /// linear pass.
    pub fn keygen<R: RngCore + CryptoRng>(rng: &mut R) -> Result<(PublicKey, SecretKey)> {
        let mut sk = [0u8; SECRET_KEY_BYTES];
        rng.try_fill_bytes(&mut sk)
            .map_err(|e| Error::RandomnessExhausted(e.to_string()))?;

        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        pk[..MASKS_BYTES].copy_from_slice(&sk[SEED_BYTES..SEED_BYTES + MASKS_BYTES]);

        let a = LeafAddr {
            level: N_LEVELS - 1,
            subtree: 0,
            subleaf: 0,
        };
        let root = treehash(SUBTREE_HEIGHT, &sk, &a, &pk[..MASKS_BYTES]);
        pk[MASKS_BYTES..].copy_from_slice(&root);

        Ok((PublicKey(pk), SecretKey(sk)))
    }

    /// Signs `message` under `sk`.
    ///
    /// Signatures are deterministic: the randomizer `R` and the leaf index
    /// are derived from the secret randomizer seed and the message, so the
    /// same `(sk, message)` pair always yields the same signature.
    pub fn sign(sk: &SecretKey, message: &[u8]) -> Signature {
        let mut sig = [0u8; SIGNATURE_BYTES];

        let mut rnd = hash::prf_seed(sk.sk_rand(), message);
        let leafidx = bytes_to_u64(&rnd[..8]) & ((1 << TOTAL_TREE_HEIGHT) - 1);
        let mut r = [0u8; MSG_HASH_SEED_BYTES];
        r.copy_from_slice(&rnd[16..16 + MSG_HASH_SEED_BYTES]);

        // Recompute the public key so signing does not require it as an
        // input.
        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        pk[..MASKS_BYTES].copy_from_slice(sk.masks());
        let top = LeafAddr {
            level: N_LEVELS - 1,
            subtree: 0,
            subleaf: 0,
        };
        let top_root = treehash(SUBTREE_HEIGHT, sk.as_ref(), &top, sk.masks());
        pk[MASKS_BYTES..].copy_from_slice(&top_root);

        let m_hash = hash::msg_hash(&r, &pk, message);

        sig[..MSG_HASH_SEED_BYTES].copy_from_slice(&r);
        sig[MSG_HASH_SEED_BYTES..MSG_HASH_SEED_BYTES + LEAF_IDX_BYTES]
            .copy_from_slice(&u64_to_bytes(leafidx));
        let mut offset = MSG_HASH_SEED_BYTES + LEAF_IDX_BYTES;

        // The HORST address carries the level value N_LEVELS, so the
        // bottom WOTS+ seed below never collides with it.
        let mut a = LeafAddr {
            level: N_LEVELS,
            subtree: leafidx >> SUBTREE_HEIGHT,
            subleaf: (leafidx & ((1 << SUBTREE_HEIGHT) - 1)) as usize,
        };
        let mut seed = get_seed(sk.as_ref(), &a);
        let mut root = horst::sign(
            &mut sig[offset..offset + HORST_SIG_BYTES],
            &seed,
            sk.masks(),
            &m_hash,
        );
        offset += HORST_SIG_BYTES;

        for level in 0..N_LEVELS {
            a.level = level;

            seed = get_seed(sk.as_ref(), &a);
            wots::sign(
                &mut sig[offset..offset + WOTS_SIG_BYTES],
                &root,
                &seed,
                sk.masks(),
            );
            offset += WOTS_SIG_BYTES;

            root = compute_authpath_wots(
                &mut sig[offset..offset + SUBTREE_HEIGHT * HASH_BYTES],
                &a,
                sk.as_ref(),
                sk.masks(),
                SUBTREE_HEIGHT,
            );
            offset += SUBTREE_HEIGHT * HASH_BYTES;

            a.subleaf = (a.subtree & ((1 << SUBTREE_HEIGHT) - 1)) as usize;
            a.subtree >>= SUBTREE_HEIGHT;
        }

        seed.zeroize();
        rnd.zeroize();
        Signature(sig)
    }

    /// Checks `sig` over `message` against `pk`. The sole point of truth
    /// is the final constant-time comparison of the reconstructed root
    /// against the stored one.
    pub fn verify(pk: &PublicKey, message: &[u8], sig: &Signature) -> bool {
        let sig = sig.as_ref();

        let m_hash = hash::msg_hash(&sig[..MSG_HASH_SEED_BYTES], pk.as_ref(), message);
        let mut leafidx =
            bytes_to_u64(&sig[MSG_HASH_SEED_BYTES..MSG_HASH_SEED_BYTES + LEAF_IDX_BYTES]);
        let mut offset = MSG_HASH_SEED_BYTES + LEAF_IDX_BYTES;

        // A corrupt HORST segment yields a wrong root here and is caught
        // by the final comparison.
        let mut root = horst::verify(&sig[offset..offset + HORST_SIG_BYTES], pk.masks(), &m_hash);
        offset += HORST_SIG_BYTES;

        let mut wots_pk = [0u8; WOTS_SIG_BYTES];
        for _ in 0..N_LEVELS {
            wots::verify(
                &mut wots_pk,
                &sig[offset..offset + WOTS_SIG_BYTES],
                &root,
                pk.masks(),
            );
            offset += WOTS_SIG_BYTES;

            let pkhash = l_tree(&mut wots_pk, pk.masks());
            root = validate_authpath(
                &pkhash,
                (leafidx & ((1 << SUBTREE_HEIGHT) - 1)) as usize,
                &sig[offset..offset + SUBTREE_HEIGHT * HASH_BYTES],
                pk.masks(),
                SUBTREE_HEIGHT,
            );
            offset += SUBTREE_HEIGHT * HASH_BYTES;
            leafidx >>= SUBTREE_HEIGHT;
        }

        bool::from(root[..].ct_eq(pk.root()))
    }

    /// Splits `combined` (a signature followed by the message body),
    /// verifies it, and returns the body.
    pub fn open<'a>(pk: &PublicKey, combined: &'a [u8]) -> Result<&'a [u8]> {
        if combined.len() < SIGNATURE_BYTES {
            return Err(Error::SignatureTooShort(SIGNATURE_BYTES, combined.len()));
        }

        let sig = Signature::try_from(&combined[..SIGNATURE_BYTES])?;
        let body = &combined[SIGNATURE_BYTES..];
        if !Self::verify(pk, body, &sig) {
            return Err(Error::VerificationFailed);
        }
        Ok(body)
    }
}
