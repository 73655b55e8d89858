//! Fixed SPHINCS-256 parameters.
//!
//! All values are compile-time constants; the assertions at the bottom of
//! this file encode the parameter consistency rules and fail the build if
//! any of them is violated.

/// Output size of the underlying 256-bit hash functions in bytes.
pub const HASH_BYTES: usize = 32;

/// Output size of the 512-bit message-digest hash in bytes.
pub const MSG_HASH_BYTES: usize = 64;

/// Per-leaf secret seed size in bytes.
pub const SEED_BYTES: usize = 32;

/// Size of the secret randomizer seed stored at the tail of a secret key.
pub const SK_RAND_SEED_BYTES: usize = 32;

/// Size of the public message-hash randomizer `R` carried in a signature.
pub const MSG_HASH_SEED_BYTES: usize = 32;

/// Height of each certification subtree.
pub const SUBTREE_HEIGHT: usize = 5;

/// Total height of the hypertree.
pub const TOTAL_TREE_HEIGHT: usize = 60;

/// Number of subtree layers stacked above the HORST instances.
pub const N_LEVELS: usize = TOTAL_TREE_HEIGHT / SUBTREE_HEIGHT;

/// Serialized size of the pseudorandom leaf index.
pub const LEAF_IDX_BYTES: usize = (TOTAL_TREE_HEIGHT + 7) / 8;

/// Winternitz parameter.
pub const WOTS_W: usize = 16;

/// Bits per Winternitz digit.
pub const WOTS_LOG_W: usize = 4;

/// Number of message digits in a WOTS+ signature.
pub const WOTS_L1: usize = (HASH_BYTES * 8) / WOTS_LOG_W;

/// Number of checksum digits in a WOTS+ signature.
pub const WOTS_L2: usize = 3;

/// Total number of WOTS+ chains.
pub const WOTS_L: usize = WOTS_L1 + WOTS_L2;

/// ceil(log2(WOTS_L)), the number of L-tree levels.
pub const WOTS_LOG_L: usize = 7;

/// Size of a WOTS+ signature (and of an uncompressed WOTS+ public key).
pub const WOTS_SIG_BYTES: usize = WOTS_L * HASH_BYTES;

/// log2 of the number of HORST secret-key elements.
pub const HORST_LOG_T: usize = 16;

/// Number of HORST secret-key elements.
pub const HORST_T: usize = 1 << HORST_LOG_T;

/// Number of secret-key elements revealed per HORST signature.
pub const HORST_K: usize = 32;

/// Size of one HORST secret-key element.
pub const HORST_SK_BYTES: usize = 32;

/// Number of tree levels covered by each HORST authentication path. The
/// nodes above this level are cheaper to reveal verbatim than to
/// authenticate per index.
pub const HORST_AUTH_LEVELS: usize = HORST_LOG_T - 6;

/// Number of Merkle nodes revealed verbatim in every HORST signature.
pub const HORST_TOP_NODES: usize = 1 << (HORST_LOG_T - HORST_AUTH_LEVELS);

/// Size of a HORST signature.
pub const HORST_SIG_BYTES: usize = HORST_TOP_NODES * HASH_BYTES
    + HORST_K * (HORST_SK_BYTES + HORST_AUTH_LEVELS * HASH_BYTES);

/// Number of public 32-byte masks shared by all components. HORST is the
/// most mask-hungry consumer; the WOTS+ chains and the subtree levels fit
/// inside the same region.
pub const N_MASKS: usize = 2 * HORST_LOG_T;

/// Size of the mask region in keys.
pub const MASKS_BYTES: usize = N_MASKS * HASH_BYTES;

/// Size of a public key: masks followed by the hypertree root.
pub const PUBLIC_KEY_BYTES: usize = (N_MASKS + 1) * HASH_BYTES;

/// Size of a secret key: leaf seed, mask copy, and randomizer seed.
pub const SECRET_KEY_BYTES: usize =
    SEED_BYTES + PUBLIC_KEY_BYTES - HASH_BYTES + SK_RAND_SEED_BYTES;

/// Size of a signature.
pub const SIGNATURE_BYTES: usize = MSG_HASH_SEED_BYTES
    + LEAF_IDX_BYTES
    + HORST_SIG_BYTES
    + N_LEVELS * WOTS_SIG_BYTES
    + TOTAL_TREE_HEIGHT * HASH_BYTES;

const _: () = assert!(SEED_BYTES == HASH_BYTES);
const _: () = assert!(SUBTREE_HEIGHT == 5);
const _: () = assert!(TOTAL_TREE_HEIGHT == 60);
const _: () = assert!(TOTAL_TREE_HEIGHT - SUBTREE_HEIGHT <= 64);
const _: () = assert!(N_LEVELS >= 8 && N_LEVELS <= 15);
const _: () = assert!(MSG_HASH_SEED_BYTES == 32);
const _: () = assert!(HORST_K * 2 <= MSG_HASH_BYTES);
const _: () = assert!(N_MASKS >= 2 * (SUBTREE_HEIGHT + WOTS_LOG_L));
const _: () = assert!(N_MASKS >= WOTS_W - 1);
const _: () = assert!(N_MASKS >= 2 * HORST_LOG_T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sizes() {
        assert_eq!(WOTS_L, 67);
        assert_eq!(WOTS_SIG_BYTES, 2144);
        assert_eq!(HORST_SIG_BYTES, 13312);
        assert_eq!(MASKS_BYTES, 1024);
        assert_eq!(PUBLIC_KEY_BYTES, 1056);
        assert_eq!(SECRET_KEY_BYTES, 1088);
        assert_eq!(SIGNATURE_BYTES, 41000);
    }

    #[test]
    fn test_leaf_index_fits_its_field() {
        assert_eq!(LEAF_IDX_BYTES, 8);
        assert!(TOTAL_TREE_HEIGHT <= LEAF_IDX_BYTES * 8);
        assert_eq!(TOTAL_TREE_HEIGHT, N_LEVELS * SUBTREE_HEIGHT);
    }
}
