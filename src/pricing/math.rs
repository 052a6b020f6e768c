//! Integer math primitives for the curve engine.
//!
//! Both functions are pure integer routines: no floating point, no external
//! state, identical results on every platform.

use crate::types::mul_div;

/// Fixed-point scale for [`approx_log`] results: 10^6.
pub const LOG_SCALE: u128 = 1_000_000;

/// Integer cube root, floored.
///
/// Classic shift-and-subtract digit recurrence: builds the root one bit at a
/// time from the most significant end, 3 input bits per output bit.
///
/// ## Example
///
/// ```
/// use gast_core::pricing::cbrt;
///
/// assert_eq!(cbrt(27), 3);
/// assert_eq!(cbrt(26), 2);
/// ```
pub fn cbrt(n: u128) -> u128 {
    let mut x = n;
    let mut y: u128 = 0;
    let mut s: i32 = 126;
    while s >= 0 {
        y <<= 1;
        let b = 3 * y * (y + 1) + 1;
        if (x >> s) >= b {
            x -= b << s;
            y += 1;
        }
        s -= 3;
    }
    y
}

/// Approximate base-2 logarithm, scaled by [`LOG_SCALE`] and floored.
/// Inputs of zero and one map to zero.
///
/// Uses the bit length for the integer part and a linear interpolation within
/// the octave for the fraction: exact at powers of two, and within 0.087 of
/// the true log2 everywhere (in [`LOG_SCALE`] units, under 0.09 * 10^6).
///
/// ## Example
///
/// ```
/// use gast_core::pricing::{approx_log, LOG_SCALE};
///
/// assert_eq!(approx_log(1024), 10 * LOG_SCALE);
/// assert_eq!(approx_log(3), 3 * LOG_SCALE / 2);
/// ```
pub fn approx_log(n: u128) -> u128 {
    if n <= 1 {
        return 0;
    }
    let k = 127 - n.leading_zeros() as u128;
    let base = 1u128 << k;
    // k + (n - 2^k) / 2^k, scaled. The fraction goes through the 256-bit
    // helper: n - base < base, so the quotient is always below LOG_SCALE and
    // the division cannot fail.
    k * LOG_SCALE + mul_div(n - base, LOG_SCALE, base).unwrap_or(0)
}

// ============================================================================
// Unit Tests
// ============================================================================
