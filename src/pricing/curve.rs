//! Closed-form curve engine.
//!
//! Computes the marginal price directly from the current total supply:
//!
//! ```text
//! n(s)         = s / step_interval                      (integer division)
//! damp(n)      = cbrt(n) * approx_log(n) / (LOG_SCALE * 1000)
//! buy_price(s) = base_price + price_step * n(s) - price_step * damp(n(s))
//! ```
//!
//! The linear term raises the price by one `price_step` every `step_interval`
//! tokens of supply. The damping term shaves a sub-linear correction off that
//! staircase so late-curve prices grow slightly slower than linearly; its
//! `/ 1000` scaling keeps it at zero through the early curve (it first reaches
//! one step at `n = 195_112` under the default parameters).
//!
//! ## Monotonicity
//!
//! `buy_price` never decreases as supply grows. The linear term gains exactly
//! one `price_step` per interval, while `damp(n+1) - damp(n) <= 1` for all `n`
//! (both factors grow far slower than `1000 / cbrt`-rate would require to
//! overtake it), so the net per-interval change is `>= 0`.
//!
//! All arithmetic is checked; parameter sets that overflow the 256-bit
//! intermediates surface [`ProtocolError::Overflow`] instead of panicking.

use crate::error::{ProtocolError, Result};
use crate::pricing::math::{approx_log, cbrt, LOG_SCALE};
use crate::pricing::PricingSource;
use crate::types::{mul_div, SCALE};

/// Parameters fixed at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParameters {
    /// Marginal price at zero supply (fixed-point).
    pub base_price: u128,
    /// Price increase per interval (fixed-point).
    pub price_step: u128,
    /// Supply tokens per price interval (fixed-point).
    pub step_interval: u128,
    /// Hard cap on total token supply (fixed-point).
    pub max_supply: u128,
    /// Buy/sell spread in basis points (of the buy price).
    pub spread_bps: u32,
}

impl Default for CurveParameters {
    /// Production defaults: price starts at 0.01 and rises 0.001 per 100
    /// tokens, 100M token cap, 10% spread.
    fn default() -> Self {
        Self {
            base_price: SCALE / 100,
            price_step: SCALE / 1000,
            step_interval: 100 * SCALE,
            max_supply: 100_000_000 * SCALE,
            spread_bps: 1000,
        }
    }
}

/// Stateless pricing backend computing quotes from the curve formula.
#[derive(Debug, Clone)]
pub struct CurveEngine {
    params: CurveParameters,
}

impl CurveEngine {
    /// Creates an engine over the given parameters.
    pub fn new(params: CurveParameters) -> Self {
        debug_assert!(params.base_price > 0, "base price must be positive");
        debug_assert!(params.step_interval > 0, "step interval must be positive");
        debug_assert!(params.spread_bps <= 10_000, "spread cannot exceed 100%");
        Self { params }
    }

    /// The construction-time parameters.
    #[inline]
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    /// Interval index for a supply level.
    #[inline]
    fn interval(&self, supply: u128) -> u128 {
        supply / self.params.step_interval
    }

    /// Damping correction in whole price steps.
    fn damp_steps(n: u128) -> Result<u128> {
        mul_div(cbrt(n), approx_log(n), LOG_SCALE * 1000).ok_or(ProtocolError::Overflow)
    }
}

impl PricingSource for CurveEngine {
    fn buy_price(&self, supply: u128) -> Result<u128> {
        let n = self.interval(supply);
        let linear = self
            .params
            .price_step
            .checked_mul(n)
            .ok_or(ProtocolError::Overflow)?;
        let staircase = self
            .params
            .base_price
            .checked_add(linear)
            .ok_or(ProtocolError::Overflow)?;
        let damp = self
            .params
            .price_step
            .checked_mul(Self::damp_steps(n)?)
            .ok_or(ProtocolError::Overflow)?;
        // damp < price_step * n for every n, so the price stays above base.
        debug_assert!(damp <= staircase, "damping bound broken at n = {n}");
        Ok(staircase.saturating_sub(damp))
    }

    fn spread(&self, supply: u128) -> Result<u128> {
        let buy = self.buy_price(supply)?;
        mul_div(buy, self.params.spread_bps as u128, 10_000).ok_or(ProtocolError::Overflow)
    }

    fn sell_price(&self, supply: u128) -> Result<u128> {
        let buy = self.buy_price(supply)?;
        let spread = self.spread(supply)?;
        buy.checked_sub(spread).ok_or(ProtocolError::Overflow)
    }

    fn buy_quote(&self, supply: u128, funds: u128) -> Result<u128> {
        if supply >= self.params.max_supply {
            return Err(ProtocolError::SupplyExceeded);
        }
        if funds == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        let price = self.buy_price(supply)?;
        let tokens = mul_div(funds, SCALE, price).ok_or(ProtocolError::Overflow)?;
        if tokens == 0 {
            // Payment too small to mint a single base unit.
            return Err(ProtocolError::ZeroAmount);
        }
        Ok(tokens)
    }

    fn sell_quote(&self, supply: u128, tokens: u128) -> Result<u128> {
        if tokens == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        let price = self.sell_price(supply)?;
        let funds = mul_div(tokens, price, SCALE).ok_or(ProtocolError::Overflow)?;
        if funds == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        Ok(funds)
    }

    fn max_supply(&self) -> u128 {
        self.params.max_supply
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
