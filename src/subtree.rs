//! Subtree hashing: L-tree compression of WOTS+ public keys, Merkle root
//! construction, and authentication-path handling for the height-5
//! certification trees of the hypertree.

use crate::address::LeafAddr;
use crate::hash;
use crate::params::{HASH_BYTES, SEED_BYTES, WOTS_L, WOTS_LOG_L, WOTS_SIG_BYTES};
use crate::utils::u64_to_bytes;
use crate::wots;
use zeroize::Zeroize;

/// Derives the per-leaf secret seed for `a`. Deterministic: the same key
/// and address always yield the same seed.
pub(crate) fn get_seed(sk: &[u8], a: &LeafAddr) -> [u8; SEED_BYTES] {
    let mut buffer = [0u8; SEED_BYTES + 8];
    buffer[..SEED_BYTES].copy_from_slice(&sk[..SEED_BYTES]);
    buffer[SEED_BYTES..].copy_from_slice(&u64_to_bytes(a.pack()));
    let seed = hash::varlen(&buffer);
    buffer.zeroize();
    seed
}

/// Compresses the [`WOTS_L`] public-key blocks in `wots_pk` down to a
/// single leaf value. Works in place; an odd block at any level is
/// promoted unchanged to the next one.
pub(crate) fn l_tree(wots_pk: &mut [u8], masks: &[u8]) -> [u8; HASH_BYTES] {
    let mut l = WOTS_L;
    for i in 0..WOTS_LOG_L {
        for j in 0..l >> 1 {
            let node = hash::hash_2n_n_mask(
                &wots_pk[2 * j * HASH_BYTES..(2 * j + 2) * HASH_BYTES],
                &masks[2 * i * HASH_BYTES..(2 * i + 2) * HASH_BYTES],
            );
            wots_pk[j * HASH_BYTES..(j + 1) * HASH_BYTES].copy_from_slice(&node);
        }
        if l & 1 != 0 {
            wots_pk.copy_within((l - 1) * HASH_BYTES..l * HASH_BYTES, (l >> 1) * HASH_BYTES);
            l = (l >> 1) + 1;
        } else {
            l >>= 1;
        }
    }
    let mut leaf = [0u8; HASH_BYTES];
    leaf.copy_from_slice(&wots_pk[..HASH_BYTES]);
    leaf
}

/// Builds the subtree leaf for `a`: WOTS+ public key from the derived
/// seed, compressed through the L-tree.
fn gen_leaf_wots(sk: &[u8], masks: &[u8], a: &LeafAddr) -> [u8; HASH_BYTES] {
    let mut seed = get_seed(sk, a);
    let mut pk = [0u8; WOTS_SIG_BYTES];
    wots::pkgen(&mut pk, &seed, masks);
    let leaf = l_tree(&mut pk, masks);
    seed.zeroize();
    pk.zeroize();
    leaf
}

/// Computes the root of the height-`height` tree whose leaves start at
/// `leaf`, walking the leaves in order with a collapsing stack. Adjacent
/// stack entries of equal level always merge before the next leaf is
/// pushed.
pub(crate) fn treehash(
    height: usize,
    sk: &[u8],
    leaf: &LeafAddr,
    masks: &[u8],
) -> [u8; HASH_BYTES] {
    let mut a = *leaf;
    let mut stack = vec![0u8; (height + 1) * HASH_BYTES];
    let mut stack_levels = vec![0usize; height + 1];
    let mut stack_offset = 0;

    let last = a.subleaf + (1 << height);
    while a.subleaf < last {
        let leaf_node = gen_leaf_wots(sk, masks, &a);
        stack[stack_offset * HASH_BYTES..(stack_offset + 1) * HASH_BYTES]
            .copy_from_slice(&leaf_node);
        stack_levels[stack_offset] = 0;
        stack_offset += 1;

        while stack_offset > 1 && stack_levels[stack_offset - 1] == stack_levels[stack_offset - 2]
        {
            let mask_off = 2 * (stack_levels[stack_offset - 1] + WOTS_LOG_L) * HASH_BYTES;
            let node = hash::hash_2n_n_mask(
                &stack[(stack_offset - 2) * HASH_BYTES..stack_offset * HASH_BYTES],
                &masks[mask_off..mask_off + 2 * HASH_BYTES],
            );
            stack[(stack_offset - 2) * HASH_BYTES..(stack_offset - 1) * HASH_BYTES]
                .copy_from_slice(&node);
            stack_levels[stack_offset - 2] += 1;
            stack_offset -= 1;
        }
        a.subleaf += 1;
    }

    let mut root = [0u8; HASH_BYTES];
    root.copy_from_slice(&stack[..HASH_BYTES]);
    stack.zeroize();
    root
}

/// Materializes the full height-`height` subtree containing `a`, writing
/// the authentication path for `a.subleaf` into `authpath` and returning
/// the root.
pub(crate) fn compute_authpath_wots(
    authpath: &mut [u8],
    a: &LeafAddr,
    sk: &[u8],
    masks: &[u8],
    height: usize,
) -> [u8; HASH_BYTES] {
    let leaves = 1 << height;
    debug_assert_eq!(authpath.len(), height * HASH_BYTES);

    let mut seeds = vec![[0u8; SEED_BYTES]; leaves];
    let mut pks = vec![0u8; leaves * WOTS_SIG_BYTES];
    // Heap-ordered node storage: leaves at [leaves, 2 * leaves), root at 1.
    let mut tree = vec![0u8; 2 * leaves * HASH_BYTES];

    let mut ta = *a;
    for subleaf in 0..leaves {
        ta.subleaf = subleaf;
        seeds[subleaf] = get_seed(sk, &ta);
    }
    for subleaf in 0..leaves {
        wots::pkgen(
            &mut pks[subleaf * WOTS_SIG_BYTES..(subleaf + 1) * WOTS_SIG_BYTES],
            &seeds[subleaf],
            masks,
        );
    }
    for subleaf in 0..leaves {
        let leaf_node = l_tree(
            &mut pks[subleaf * WOTS_SIG_BYTES..(subleaf + 1) * WOTS_SIG_BYTES],
            masks,
        );
        tree[(leaves + subleaf) * HASH_BYTES..(leaves + subleaf + 1) * HASH_BYTES]
            .copy_from_slice(&leaf_node);
    }

    let mut level = 0;
    let mut row = leaves;
    while row >= 2 {
        for j in (0..row).step_by(2) {
            let mask_off = 2 * (WOTS_LOG_L + level) * HASH_BYTES;
            let node = hash::hash_2n_n_mask(
                &tree[(row + j) * HASH_BYTES..(row + j + 2) * HASH_BYTES],
                &masks[mask_off..mask_off + 2 * HASH_BYTES],
            );
            let parent = (row >> 1) + (j >> 1);
            tree[parent * HASH_BYTES..(parent + 1) * HASH_BYTES].copy_from_slice(&node);
        }
        level += 1;
        row >>= 1;
    }

    for i in 0..height {
        let sibling = (leaves >> i) + ((a.subleaf >> i) ^ 1);
        authpath[i * HASH_BYTES..(i + 1) * HASH_BYTES]
            .copy_from_slice(&tree[sibling * HASH_BYTES..(sibling + 1) * HASH_BYTES]);
    }

    let mut root = [0u8; HASH_BYTES];
    root.copy_from_slice(&tree[HASH_BYTES..2 * HASH_BYTES]);
    seeds.zeroize();
    pks.zeroize();
    tree.zeroize();
    root
}

/// Folds `leaf` up an authentication path of length `height`, returning
/// the implied root.
pub(crate) fn validate_authpath(
    leaf: &[u8; HASH_BYTES],
    leafidx: usize,
    authpath: &[u8],
    masks: &[u8],
    height: usize,
) -> [u8; HASH_BYTES] {
    debug_assert_eq!(authpath.len(), height * HASH_BYTES);

    let mut buffer = [0u8; 2 * HASH_BYTES];
    if leafidx & 1 != 0 {
        buffer[..HASH_BYTES].copy_from_slice(&authpath[..HASH_BYTES]);
        buffer[HASH_BYTES..].copy_from_slice(leaf);
    } else {
        buffer[..HASH_BYTES].copy_from_slice(leaf);
        buffer[HASH_BYTES..].copy_from_slice(&authpath[..HASH_BYTES]);
    }

    let mut idx = leafidx;
    let mut path_off = HASH_BYTES;
    for i in 0..height - 1 {
        idx >>= 1;
        let mask_off = 2 * (WOTS_LOG_L + i) * HASH_BYTES;
        let node = hash::hash_2n_n_mask(&buffer, &masks[mask_off..mask_off + 2 * HASH_BYTES]);
        if idx & 1 != 0 {
            buffer[HASH_BYTES..].copy_from_slice(&node);
            buffer[..HASH_BYTES].copy_from_slice(&authpath[path_off..path_off + HASH_BYTES]);
        } else {
            buffer[..HASH_BYTES].copy_from_slice(&node);
            buffer[HASH_BYTES..].copy_from_slice(&authpath[path_off..path_off + HASH_BYTES]);
        }
        path_off += HASH_BYTES;
    }

    let mask_off = 2 * (WOTS_LOG_L + height - 1) * HASH_BYTES;
    hash::hash_2n_n_mask(&buffer, &masks[mask_off..mask_off + 2 * HASH_BYTES])
}
