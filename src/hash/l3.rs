//! L3: the inner-product finalizer over 2^64 - 257.

use super::{add128, mul_wide, M63, P64};

/// Finalize a 127-bit polynomial state into a 64-bit digest.
///
/// `(p1, p2)` is the accumulated state (high, low), `(k1, k2)` the l3 key
/// pair (both words below the prime), and `len` the length encoding: the
/// message tail in bits, not the total length. The steps are
///
/// 1. fully reduce `(p1, p2) + (len, 0)` modulo 2^127 - 1,
/// 2. split the result as `q * (2^64 - 2^32) + r`,
/// 3. add the key pair modulo 2^64 - 257,
/// 4. return the keyed product reduced modulo 2^64 - 257.
///
/// The overflow corrections are branch-free sign-mask adjustments, as in
/// other fixed-modulus MAC finalizers.
pub(crate) fn l3hash(p1: u64, p2: u64, k1: u64, k2: u64, len: u64) -> u64 {
    // Fold the stray top bit (2^127 = 1), add the length to the high word,
    // then subtract the prime once if the sum reached it.
    let t = p1 >> 63;
    let (mut p1, mut p2) = add128(p1 & M63, p2, len, t);
    let t = u64::from(p1 > M63) + u64::from(p1 == M63 && p2 == u64::MAX);
    (p1, p2) = add128(p1, p2, 0, t);
    p1 &= M63;

    // Quotient and remainder by 2^64 - 2^32: estimate the quotient from the
    // high bits, with a double-carry correction at the 32-bit seam.
    let mut t = p1.wrapping_add(p2 >> 32);
    t = t.wrapping_add(t >> 32);
    t = t.wrapping_add(u64::from(t as u32 > 0xffff_fffe));
    let q = p1.wrapping_add(t >> 32);
    let r = p2.wrapping_add(q << 32);

    // Key both halves modulo 2^64 - 257: a wrap of 2^64 is repaid with 257.
    let x = q.wrapping_add(k1);
    let x = x.wrapping_add(u64::from(x < k1).wrapping_neg() & 257);
    let y = r.wrapping_add(k2);
    let y = y.wrapping_add(u64::from(y < k2).wrapping_neg() & 257);

    // Multiply and reduce with 2^64 = 257: fold the high word in at weight
    // 1 and weight 2^8, then normalize into [0, 2^64 - 257).
    let (hi, mut lo) = mul_wide(x, y);
    let mut t = hi >> 56;
    (t, lo) = add128(t, lo, 0, hi);
    (t, lo) = add128(t, lo, 0, hi << 8);
    t = t.wrapping_add(t << 8);
    lo = lo.wrapping_add(t);
    lo = lo.wrapping_add(u64::from(lo < t).wrapping_neg() & 257);
    lo = lo.wrapping_add(u64::from(lo > P64 - 1).wrapping_neg() & 257);
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const P127: u128 = (1 << 127) - 1;
    const DIVISOR: u128 = (1 << 64) - (1 << 32);
    const PRIME64: u128 = P64 as u128;

    // Reference built from u128 division: reduce, decompose, key, multiply.
    fn l3_model(p1: u64, p2: u64, k1: u64, k2: u64, len: u64) -> u64 {
        let v = u128::from(p1) << 64 | u128::from(p2);
        let w = ((v & P127) + (v >> 127) + (u128::from(len) << 64)) % P127;
        let q = w / DIVISOR;
        let r = w % DIVISOR;
        let x = (q + u128::from(k1)) % PRIME64;
        let y = (r + u128::from(k2)) % PRIME64;
        (x * y % PRIME64) as u64
    }

    #[test]
    fn zero_state_zero_key_is_zero() {
        assert_eq!(l3hash(0, 0, 0, 0, 0), 0);
    }

    #[test]
    fn output_is_fully_reduced_at_the_boundary() {
        // Key pairs picked so the product lands near the modulus.
        for k in [P64 - 1, P64 - 2, 1, 2] {
            let out = l3hash(u64::MAX, u64::MAX, k, P64 - 1, 8 * 4095);
            assert!(out < P64);
            assert_eq!(out, l3_model(u64::MAX, u64::MAX, k, P64 - 1, 8 * 4095));
        }
    }

    proptest! {
        #[test]
        fn matches_model(
            p1 in any::<u64>(),
            p2 in any::<u64>(),
            k1 in 0..P64,
            k2 in 0..P64,
            // 8 * tail bytes, tail below the largest permitted block size
            len in 0..8 * 4096u64,
        ) {
            let out = l3hash(p1, p2, k1, k2, len);
            prop_assert!(out < P64);
            prop_assert_eq!(out, l3_model(p1, p2, k1, k2, len));
        }
    }
}
