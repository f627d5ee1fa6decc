//! Poly-127: the Carter-Wegman layer-2 polynomial over 2^127 - 1.

use super::{add128, mul_wide, M63};

/// One polynomial step: `a' = a*k + m  mod 2^127 - 1`.
///
/// State and operands are (high, low) pairs of 64-bit words. Preconditions:
/// `a_hi < 2^63` (normalized 127-bit state), `k` carries the 29-bit-lane
/// mask, `m_hi < 2^62`. The result is kept below 2^127 by folding the high
/// product bits through `2^127 = 1`, re-establishing `a_hi < 2^63`; full
/// reduction below the prime is deferred to the l3 layer.
pub(crate) fn poly_step(a: (u64, u64), k: (u64, u64), m: (u64, u64)) -> (u64, u64) {
    let (ah, al) = a;
    let (kh, kl) = k;
    let (mh, ml) = m;

    // Schoolbook 127x125 product from four 64x64 multiplies. With the key
    // mask in force, kh < 2^61, so 2*kh cannot overflow.
    let (t3h, t3l) = mul_wide(al, kh);
    let (t2h, t2l) = mul_wide(ah, kl);
    let (t1h, t1l) = mul_wide(ah, 2 * kh);
    let (mut rh, mut rl) = mul_wide(al, kl);

    // rl:rh accumulates bd + 2*ac; sh:sl holds ad + bc.
    (rh, rl) = add128(rh, rl, t1h, t1l);
    let (mut sh, sl) = add128(t2h, t2l, t3h, t3l);

    // Align the cross terms: sl joins the high accumulator word.
    let (low, carry) = rh.overflowing_add(sl);
    sh = sh.wrapping_add(u64::from(carry));

    // Fold everything above bit 126 back through 2^127 = 1.
    let folded = sh.wrapping_mul(2).wrapping_add(low >> 63);
    let rh = low & M63;

    let (rh, rl) = add128(rh, rl, mh, ml);
    add128(rh, rl, 0, folded)
}
