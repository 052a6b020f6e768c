//! Pricing backends.
//!
//! The exchange prices every trade through the [`PricingSource`] trait, so
//! the marginal-price backend is swappable at deployment time:
//!
//! - [`CurveEngine`]: evaluates the closed-form curve per query
//! - [`PriceTable`]: interpolates an offline-generated lookup table
//!
//! Both speak the same fixed-point language (10^18 scaling, u128 amounts) and
//! both are deterministic and float-free.

pub mod curve;
pub mod math;
pub mod table;

pub use curve::{CurveEngine, CurveParameters};
pub use math::{approx_log, cbrt, LOG_SCALE};
pub use table::{PriceDataEntry, PriceTable, MAX_TABLE_ENTRIES};

use crate::error::Result;

/// A deterministic source of marginal prices and trade quotes.
///
/// Prices are functions of total supply only. Implementations must be
/// monotone (buy price never decreases with supply) and must keep
/// `sell_price + spread == buy_price` at every queryable supply.
pub trait PricingSource {
    /// Marginal buy price at the given total supply.
    fn buy_price(&self, supply: u128) -> Result<u128>;

    /// Marginal sell price at the given total supply.
    fn sell_price(&self, supply: u128) -> Result<u128>;

    /// Buy/sell spread at the given total supply.
    fn spread(&self, supply: u128) -> Result<u128>;

    /// Tokens minted for a payment of `funds` at the given supply, floored.
    ///
    /// Fails with `SupplyExceeded` at or above [`max_supply`](Self::max_supply)
    /// and with `ZeroAmount` for zero or dust payments.
    fn buy_quote(&self, supply: u128, funds: u128) -> Result<u128>;

    /// Funds paid out for burning `tokens` at the given supply, floored.
    ///
    /// Fails with `ZeroAmount` for zero or dust sales.
    fn sell_quote(&self, supply: u128, tokens: u128) -> Result<u128>;

    /// Hard cap on total supply under this backend.
    fn max_supply(&self) -> u128;
}
