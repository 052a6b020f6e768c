//! Precomputed price table backend.
//!
//! Serves quotes from an offline-generated table of `(cumulative_supply,
//! buy_price, sell_price, spread)` entries instead of evaluating the curve
//! formula. Lookups bisect to the surrounding pair of entries and linearly
//! interpolate between them, so a table can cover a hundred-million-token
//! domain with a few hundred rows.
//!
//! A table is validated in full at construction and immutable afterwards:
//! every runtime query on an accepted table is infallible except for domain
//! errors ([`ProtocolError::OutOfRange`] outside `[first, last]` supply) and
//! the cap check. Tables meant to serve from genesis must include a
//! supply-zero entry.

use crate::error::{ProtocolError, Result, TableError};
use crate::pricing::PricingSource;
use crate::types::{mul_div, SCALE};

/// Upper bound on accepted table sizes.
pub const MAX_TABLE_ENTRIES: usize = 6000;

/// One row of a price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDataEntry {
    /// Supply level this row prices (fixed-point).
    pub cumulative_supply: u128,
    /// Marginal buy price at this supply (fixed-point).
    pub buy_price: u128,
    /// Marginal sell price at this supply (fixed-point).
    pub sell_price: u128,
    /// `buy_price - sell_price`, stored redundantly and cross-checked.
    pub spread: u128,
}

/// Validated, immutable lookup table.
#[derive(Debug, Clone)]
pub struct PriceTable {
    entries: Vec<PriceDataEntry>,
}

impl PriceTable {
    /// Validates and accepts a table.
    ///
    /// Rejects empty or oversized tables, non-increasing cumulative supply,
    /// decreasing price columns, zero buy prices, and rows whose stored
    /// spread disagrees with `buy_price - sell_price`.
    pub fn new(entries: Vec<PriceDataEntry>) -> std::result::Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        if entries.len() > MAX_TABLE_ENTRIES {
            return Err(TableError::TooLarge);
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.buy_price == 0 {
                return Err(TableError::ZeroPrice { index });
            }
            if entry.sell_price > entry.buy_price
                || entry.buy_price - entry.sell_price != entry.spread
            {
                return Err(TableError::InvalidSpread { index });
            }
            if index > 0 {
                let prev = &entries[index - 1];
                if entry.cumulative_supply <= prev.cumulative_supply
                    || entry.buy_price < prev.buy_price
                    || entry.sell_price < prev.sell_price
                {
                    return Err(TableError::NonMonotonic { index });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no rows. Unreachable on a constructed table;
    /// kept for the conventional `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The supply domain this table covers, inclusive on both ends.
    #[inline]
    pub fn domain(&self) -> (u128, u128) {
        (
            self.entries[0].cumulative_supply,
            self.entries[self.entries.len() - 1].cumulative_supply,
        )
    }

    /// Finds the entry pair bracketing `supply`.
    fn segment(&self, supply: u128) -> Result<(&PriceDataEntry, &PriceDataEntry)> {
        let (first, last) = self.domain();
        if supply < first || supply > last {
            return Err(ProtocolError::OutOfRange);
        }
        // Index of the first entry strictly above `supply`; the entry before
        // it is the greatest row at or below it.
        let idx = self
            .entries
            .partition_point(|e| e.cumulative_supply <= supply);
        let lo = &self.entries[idx - 1];
        if idx == self.entries.len() {
            Ok((lo, lo))
        } else {
            Ok((lo, &self.entries[idx]))
        }
    }

    /// Linear interpolation between bracketing rows, floored.
    fn lerp(supply: u128, lo: &PriceDataEntry, hi: &PriceDataEntry, lo_v: u128, hi_v: u128) -> Result<u128> {
        if hi.cumulative_supply == lo.cumulative_supply {
            return Ok(lo_v);
        }
        let span = hi.cumulative_supply - lo.cumulative_supply;
        let offset = supply - lo.cumulative_supply;
        // Columns are validated non-decreasing, so hi_v >= lo_v.
        let delta = mul_div(hi_v - lo_v, offset, span).ok_or(ProtocolError::Overflow)?;
        Ok(lo_v + delta)
    }
}

impl PricingSource for PriceTable {
    fn buy_price(&self, supply: u128) -> Result<u128> {
        let (lo, hi) = self.segment(supply)?;
        Self::lerp(supply, lo, hi, lo.buy_price, hi.buy_price)
    }

    fn sell_price(&self, supply: u128) -> Result<u128> {
        let (lo, hi) = self.segment(supply)?;
        Self::lerp(supply, lo, hi, lo.sell_price, hi.sell_price)
    }

    fn spread(&self, supply: u128) -> Result<u128> {
        let buy = self.buy_price(supply)?;
        let sell = self.sell_price(supply)?;
        // Both interpolations floor, so sell never overtakes buy.
        buy.checked_sub(sell).ok_or(ProtocolError::Overflow)
    }

    fn buy_quote(&self, supply: u128, funds: u128) -> Result<u128> {
        if supply >= self.max_supply() {
            return Err(ProtocolError::SupplyExceeded);
        }
        if funds == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        let price = self.buy_price(supply)?;
        let tokens = mul_div(funds, SCALE, price).ok_or(ProtocolError::Overflow)?;
        if tokens == 0 {
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

    /// The last row's cumulative supply doubles as the mintable cap while
    /// this table is the active backend.
    fn max_supply(&self) -> u128 {
        self.domain().1
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
