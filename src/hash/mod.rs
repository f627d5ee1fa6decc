//! The VHASH universal hash family
//!
//! VHASH is a three-layer almost-delta-universal hash over binary strings of
//! up to 2^63 bits: a word-parallel NH compression of each message block, a
//! Carter-Wegman polynomial over the prime 2^127 - 1 evaluated on the NH
//! outputs, and an inner-product finalizer over the prime 2^64 - 257 that
//! folds in a length encoding and yields one 64-bit digest per tag half.
//!
//! This module provides the [`Vhash`] context (key schedule, streaming
//! absorption, finalization) and the arithmetic layers beneath it. The
//! one-time-pad combine that turns a digest into a tag lives in
//! [`crate::mac`].

mod arith;
mod l3;
mod nh;
mod poly;
mod vhash;

pub use vhash::Vhash;

pub(crate) use arith::{add128, load_key64, load_msg64, mul_wide};
pub(crate) use l3::l3hash;
pub(crate) use nh::nh;
pub(crate) use poly::poly_step;

/// Tag length in bits; fixed per build. Peers must agree.
#[cfg(not(feature = "tag-128"))]
pub const TAG_BITS: usize = 64;
/// Tag length in bits; fixed per build. Peers must agree.
#[cfg(feature = "tag-128")]
pub const TAG_BITS: usize = 128;

/// Tag length in bytes
pub const TAG_BYTES: usize = TAG_BITS / 8;

/// Independent 64-bit VHASH halves per tag (one pad word is consumed each)
pub const TAG_WORDS: usize = TAG_BITS / 64;

/// Message block size in bytes at the NH-to-polynomial boundary.
///
/// Must be a power of two in `[16, 4096]`. Changing it changes the MAC;
/// peers must agree.
pub const NH_BLOCK_BYTES: usize = 128;

/// 64-bit message words per NH block
pub const NH_BLOCK_WORDS: usize = NH_BLOCK_BYTES / 8;

/// 64-bit words in the NH key table.
///
/// Two extra words per additional tag half let the second half hash the same
/// message words against a key window shifted by two.
pub const NH_KEY_WORDS: usize = NH_BLOCK_WORDS + 2 * (TAG_WORDS - 1);

/// 64-bit words of polynomial key (a (hi, lo) pair per tag half)
pub const POLY_KEY_WORDS: usize = 2 * TAG_WORDS;

/// 64-bit words of l3 key (a pair per tag half)
pub const L3_KEY_WORDS: usize = 2 * TAG_WORDS;

/// Hash key length in 64-bit words that suffices with overwhelming
/// probability, l3 rejection sampling included (20 for 64-bit tags, 26 for
/// 128-bit ones).
pub const HASH_KEY_WORDS: usize = NH_KEY_WORDS + 4 * TAG_WORDS;

/// Hash key length in bytes (160 for 64-bit tags, 208 for 128-bit ones)
pub const HASH_KEY_BYTES: usize = HASH_KEY_WORDS * 8;

/// The prime 2^64 - 257, modulus of the l3 layer
pub(crate) const P64: u64 = 0xffff_ffff_ffff_feff;

/// 62-bit mask applied to NH outputs before they enter the polynomial
pub(crate) const M62: u64 = 0x3fff_ffff_ffff_ffff;

/// 63-bit mask; the high word of a normalized 127-bit polynomial state
pub(crate) const M63: u64 = 0x7fff_ffff_ffff_ffff;

/// Polynomial key mask: every 32-bit lane is kept below 2^29 so that one
/// polynomial step stays below 2^189 in the intermediate representation
pub(crate) const MPOLY: u64 = 0x1fff_ffff_1fff_ffff;
