//! Portable wide-arithmetic primitives underneath the hash layers.
//!
//! A native 128-bit product makes one portable path sufficient where
//! assembly-era VHASH code carried a variant per architecture.

/// Full 64x64 -> 128 unsigned multiply, returned as (high, low).
#[inline(always)]
pub(crate) fn mul_wide(x: u64, y: u64) -> (u64, u64) {
    let product = u128::from(x) * u128::from(y);
    ((product >> 64) as u64, product as u64)
}

/// 128-bit add of (hi, lo) + (ih, il), modulo 2^128.
#[inline(always)]
pub(crate) fn add128(hi: u64, lo: u64, ih: u64, il: u64) -> (u64, u64) {
    let (lo, carry) = lo.overflowing_add(il);
    let hi = hi.wrapping_add(ih).wrapping_add(u64::from(carry));
    (hi, lo)
}

/// Load one message word. VHASH is specified little-endian; the
/// `big-endian` feature flips the interpretation for every message word
/// (and with it the resulting tags).
#[inline(always)]
pub(crate) fn load_msg64(bytes: &[u8]) -> u64 {
    let word: [u8; 8] = bytes[..8].try_into().expect("caller supplies 8 bytes");
    #[cfg(not(feature = "big-endian"))]
    {
        u64::from_le_bytes(word)
    }
    #[cfg(feature = "big-endian")]
    {
        u64::from_be_bytes(word)
    }
}

/// Load one key word. Hash-key and pad-key material is always read as
/// big-endian 64-bit words, independent of the message byte order.
#[inline(always)]
pub(crate) fn load_key64(bytes: &[u8]) -> u64 {
    let word: [u8; 8] = bytes[..8].try_into().expect("caller supplies 8 bytes");
    u64::from_be_bytes(word)
}
