//! Fixed-point amount representation.
//!
//! All token quantities, fund amounts, and marginal prices in the economy are
//! unsigned integers scaled by 10^18 ([`SCALE`]). Floating point never touches
//! a pricing path; `rust_decimal` is used only at the string-conversion
//! boundary (configuration, display).
//!
//! ## Representation
//!
//! - Raw amount: `u128`, always `real_value * 10^18`
//! - 1.0 token        = `1_000_000_000_000_000_000`
//! - 0.01 funds       = `10_000_000_000_000_000`
//!
//! Products of two scaled amounts exceed `u128`, so every multiply-then-divide
//! goes through a 256-bit intermediate via [`mul_div`].

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer used only as a mul-div intermediate.
    struct U256(4);
}

/// Fixed-point scaling factor: 18 decimal places.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Computes `a * b / denominator` with a 256-bit intermediate.
///
/// Returns `None` when the denominator is zero or the quotient does not fit
/// back into `u128`. The division floors.
///
/// ## Example
///
/// ```
/// use gast_core::{mul_div, SCALE};
///
/// // 2.0 * 3.0 in fixed point: rescale the product back down
/// assert_eq!(mul_div(2 * SCALE, 3 * SCALE, SCALE), Some(6 * SCALE));
/// assert_eq!(mul_div(1, 1, 0), None);
/// ```
#[inline]
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from(a) * U256::from(b);
    let quotient = product / U256::from(denominator);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.low_u128())
}

/// Converts a decimal string (e.g. "1.5") to a raw fixed-point amount.
///
/// Returns `None` for negative values, malformed strings, or values whose
/// scaled representation overflows `u128`. Fractional digits beyond 18 places
/// are truncated.
pub fn to_fixed(s: &str) -> Option<u128> {
    let d = Decimal::from_str(s).ok()?;
    decimal_to_fixed(d)
}

/// Converts a [`Decimal`] to a raw fixed-point amount.
pub fn decimal_to_fixed(d: Decimal) -> Option<u128> {
    if d.is_sign_negative() {
        return None;
    }
    let scaled = d.checked_mul(Decimal::from_u128(SCALE)?)?;
    scaled.trunc().to_u128()
}

/// Converts a raw fixed-point amount to a [`Decimal`].
///
/// Returns `None` when the amount exceeds the `Decimal` mantissa range; all
/// amounts reachable under the default economy parameters convert.
pub fn fixed_to_decimal(raw: u128) -> Option<Decimal> {
    let d = Decimal::from_u128(raw)?;
    d.checked_div(Decimal::from_u128(SCALE)?)
}

/// Formats a raw amount as a decimal string with full 18-place precision.
///
/// ## Example
///
/// ```
/// use gast_core::{from_fixed, SCALE};
///
/// assert_eq!(from_fixed(SCALE / 2), "0.500000000000000000");
/// ```
pub fn from_fixed(raw: u128) -> String {
    let whole = raw / SCALE;
    let frac = raw % SCALE;
    format!("{whole}.{frac:018}")
}

/// Formats a raw amount as a decimal string with trailing zeros trimmed.
///
/// ## Example
///
/// ```
/// use gast_core::{from_fixed_trimmed, SCALE};
///
/// assert_eq!(from_fixed_trimmed(3 * SCALE / 2), "1.5");
/// assert_eq!(from_fixed_trimmed(2 * SCALE), "2");
/// ```
pub fn from_fixed_trimmed(raw: u128) -> String {
    let s = from_fixed(raw);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
