//! NH: the word-parallel layer-1 block hash.

use super::{add128, load_msg64, mul_wide};

/// Hash one message block against a key window.
///
/// The block is interpreted as pairs of 64-bit message words m\[i\], m\[i+1\];
/// the partial sum is
///
/// ```text
/// S = sum over even i of (m[i] + k[i]) * (m[i+1] + k[i+1])   mod 2^128
/// ```
///
/// with the inner additions taken mod 2^64. The block length must be a
/// positive multiple of 16 bytes and at most `NH_BLOCK_BYTES`; the caller
/// zero-pads any message tail to the 16-byte boundary first.
///
/// For 128-bit tags the second tag half hashes the same message words
/// against this same table shifted by two words, so `key` may be longer
/// than the block requires.
pub(crate) fn nh(block: &[u8], key: &[u64]) -> (u64, u64) {
    debug_assert!(!block.is_empty() && block.len() % 16 == 0);
    debug_assert!(key.len() >= block.len() / 8);

    let mut hi = 0u64;
    let mut lo = 0u64;
    for (pair, keys) in block.chunks_exact(16).zip(key.chunks_exact(2)) {
        let m0 = load_msg64(&pair[..8]);
        let m1 = load_msg64(&pair[8..]);
        let (th, tl) = mul_wide(m0.wrapping_add(keys[0]), m1.wrapping_add(keys[1]));
        (hi, lo) = add128(hi, lo, th, tl);
    }
    (hi, lo)
}
