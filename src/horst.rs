//! HORST few-time signatures over a 512-bit message digest.
//!
//! The seed is expanded into [`HORST_T`] secret elements whose masked
//! hashes form the leaves of a Merkle tree of height
//! [`HORST_LOG_T`](crate::params::HORST_LOG_T). A signature reveals the
//! [`HORST_TOP_NODES`] nodes sitting
//! [`HORST_AUTH_LEVELS`] levels above the leaves, then one secret element
//! plus a truncated authentication path for each of the [`HORST_K`]
//! indices selected by the digest. Verification rebuilds each partial
//! path, cross-checks it against the revealed nodes, and folds the
//! revealed nodes into the root.

use crate::hash;
use crate::params::{
    HASH_BYTES, HORST_AUTH_LEVELS, HORST_K, HORST_SIG_BYTES, HORST_SK_BYTES, HORST_T,
    HORST_TOP_NODES, MSG_HASH_BYTES, SEED_BYTES,
};
use zeroize::Zeroize;

/// The k tree indices a digest commits to, as 16-bit little-endian words.
fn message_indices(msg_hash: &[u8; MSG_HASH_BYTES]) -> [usize; HORST_K] {
    let mut indices = [0usize; HORST_K];
    for (i, idx) in indices.iter_mut().enumerate() {
        *idx = u16::from_le_bytes([msg_hash[2 * i], msg_hash[2 * i + 1]]) as usize;
    }
    indices
}

/// Pair-hashes the row of `row` nodes starting at heap index `row` into
/// its parent row, using the mask pair for `level`.
fn hash_row(nodes: &mut [u8], row: usize, level: usize, masks: &[u8]) {
    for j in (0..row).step_by(2) {
        let node = hash::hash_2n_n_mask(
            &nodes[(row + j) * HASH_BYTES..(row + j + 2) * HASH_BYTES],
            &masks[2 * level * HASH_BYTES..(2 * level + 2) * HASH_BYTES],
        );
        let parent = (row >> 1) + (j >> 1);
        nodes[parent * HASH_BYTES..(parent + 1) * HASH_BYTES].copy_from_slice(&node);
    }
}

/// Signs `msg_hash` under `seed`, writing the signature into `sig` and
/// returning the Merkle root.
pub(crate) fn sign(
    sig: &mut [u8],
    seed: &[u8; SEED_BYTES],
    masks: &[u8],
    msg_hash: &[u8; MSG_HASH_BYTES],
) -> [u8; HASH_BYTES] {
    debug_assert_eq!(sig.len(), HORST_SIG_BYTES);

    let mut sk = vec![0u8; HORST_T * HORST_SK_BYTES];
    hash::prg(&mut sk, seed);

    // Heap-ordered node storage: leaves at [T, 2T), root at index 1.
    let mut tree = vec![0u8; 2 * HORST_T * HASH_BYTES];
    for i in 0..HORST_T {
        let leaf = hash::hash_n_n_mask(
            &sk[i * HORST_SK_BYTES..(i + 1) * HORST_SK_BYTES],
            &masks[..HASH_BYTES],
        );
        tree[(HORST_T + i) * HASH_BYTES..(HORST_T + i + 1) * HASH_BYTES].copy_from_slice(&leaf);
    }
    let mut level = 0;
    let mut row = HORST_T;
    while row >= 2 {
        hash_row(&mut tree, row, level, masks);
        level += 1;
        row >>= 1;
    }

    // Revealed nodes first, then one (secret, truncated path) block per
    // selected index.
    sig[..HORST_TOP_NODES * HASH_BYTES].copy_from_slice(
        &tree[HORST_TOP_NODES * HASH_BYTES..2 * HORST_TOP_NODES * HASH_BYTES],
    );
    let mut offset = HORST_TOP_NODES * HASH_BYTES;

    for idx in message_indices(msg_hash) {
        sig[offset..offset + HORST_SK_BYTES]
            .copy_from_slice(&sk[idx * HORST_SK_BYTES..(idx + 1) * HORST_SK_BYTES]);
        offset += HORST_SK_BYTES;

        let mut node = HORST_T + idx;
        for _ in 0..HORST_AUTH_LEVELS {
            let sibling = node ^ 1;
            sig[offset..offset + HASH_BYTES]
                .copy_from_slice(&tree[sibling * HASH_BYTES..(sibling + 1) * HASH_BYTES]);
            offset += HASH_BYTES;
            node >>= 1;
        }
    }

    let mut root = [0u8; HASH_BYTES];
    root.copy_from_slice(&tree[HASH_BYTES..2 * HASH_BYTES]);
    sk.zeroize();
    tree.zeroize();
    root
}

/// Recomputes the Merkle root implied by `sig` and `msg_hash`.
///
/// A recomputed node that disagrees with a revealed one yields an all-zero
/// root; the caller's final root comparison is the single point of
/// rejection, so no failure is signalled in-band.
pub(crate) fn verify(
    sig: &[u8],
    masks: &[u8],
    msg_hash: &[u8; MSG_HASH_BYTES],
) -> [u8; HASH_BYTES] {
    debug_assert_eq!(sig.len(), HORST_SIG_BYTES);

    let tops = &sig[..HORST_TOP_NODES * HASH_BYTES];
    let mut offset = HORST_TOP_NODES * HASH_BYTES;

    for idx in message_indices(msg_hash) {
        let mut node = hash::hash_n_n_mask(
            &sig[offset..offset + HORST_SK_BYTES],
            &masks[..HASH_BYTES],
        );
        offset += HORST_SK_BYTES;

        let mut pos = idx;
        for level in 0..HORST_AUTH_LEVELS {
            let sibling = &sig[offset..offset + HASH_BYTES];
            let mut buf = [0u8; 2 * HASH_BYTES];
            if pos & 1 != 0 {
                buf[..HASH_BYTES].copy_from_slice(sibling);
                buf[HASH_BYTES..].copy_from_slice(&node);
            } else {
                buf[..HASH_BYTES].copy_from_slice(&node);
                buf[HASH_BYTES..].copy_from_slice(sibling);
            }
            node = hash::hash_2n_n_mask(
                &buf,
                &masks[2 * level * HASH_BYTES..(2 * level + 2) * HASH_BYTES],
            );
            offset += HASH_BYTES;
            pos >>= 1;
        }

        let top = idx >> HORST_AUTH_LEVELS;
        if node[..] != tops[top * HASH_BYTES..(top + 1) * HASH_BYTES] {
            return [0u8; HASH_BYTES];
        }
    }

    // Fold the revealed nodes up the remaining levels.
    let mut nodes = [0u8; 2 * HORST_TOP_NODES * HASH_BYTES];
    nodes[HORST_TOP_NODES * HASH_BYTES..].copy_from_slice(tops);
    let mut level = HORST_AUTH_LEVELS;
    let mut row = HORST_TOP_NODES;
    while row >= 2 {
        hash_row(&mut nodes, row, level, masks);
        level += 1;
        row >>= 1;
    }

    let mut root = [0u8; HASH_BYTES];
    root.copy_from_slice(&nodes[HASH_BYTES..2 * HASH_BYTES]);
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MASKS_BYTES;
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn fixtures() -> ([u8; SEED_BYTES], Vec<u8>, [u8; MSG_HASH_BYTES]) {
        let mut seed = [0u8; SEED_BYTES];
        let mut msg_hash = [0u8; MSG_HASH_BYTES];
        OsRng.fill_bytes(&mut seed);
        OsRng.fill_bytes(&mut msg_hash);
        let masks = (0..MASKS_BYTES).map(|i| (i * 13 + 1) as u8).collect();
        (seed, masks, msg_hash)
    }

    #[test]
    fn test_sign_verify_roots_agree() {
        let (seed, masks, msg_hash) = fixtures();
        let mut sig = vec![0u8; HORST_SIG_BYTES];
        let root = sign(&mut sig, &seed, &masks, &msg_hash);
        assert_ne!(root, [0u8; HASH_BYTES]);
        assert_eq!(verify(&sig, &masks, &msg_hash), root);
    }

    #[test]
    fn test_tampered_secret_is_rejected() {
        let (seed, masks, msg_hash) = fixtures();
        let mut sig = vec![0u8; HORST_SIG_BYTES];
        let root = sign(&mut sig, &seed, &masks, &msg_hash);

        // First revealed secret element, right after the top nodes.
        sig[HORST_TOP_NODES * HASH_BYTES] ^= 1;
        assert_eq!(verify(&sig, &masks, &msg_hash), [0u8; HASH_BYTES]);
        assert_ne!(verify(&sig, &masks, &msg_hash), root);
    }

    #[test]
    fn test_tampered_top_node_changes_root() {
        let (seed, masks, msg_hash) = fixtures();
        let mut sig = vec![0u8; HORST_SIG_BYTES];
        let root = sign(&mut sig, &seed, &masks, &msg_hash);

        sig[0] ^= 1;
        assert_ne!(verify(&sig, &masks, &msg_hash), root);
    }

    #[test]
    fn test_different_digest_changes_root() {
        let (seed, masks, msg_hash) = fixtures();
        let mut sig = vec![0u8; HORST_SIG_BYTES];
        let root = sign(&mut sig, &seed, &masks, &msg_hash);

        let mut other = msg_hash;
        other[0] ^= 1;
        assert_ne!(verify(&sig, &masks, &other), root);
    }
}
