//! Error taxonomy for the GAST economy.
//!
//! Every failure is a rejected operation, never a crash: all errors surface
//! synchronously to the caller of the public entry point that detected them,
//! and any entry point that returns an error leaves state untouched.

use thiserror::Error;

/// Errors surfaced by the runtime components (ledger, reserve, treasury,
/// exchange, rebalancer, pricing backends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Caller lacks the required role (exchange-only, owner-only,
    /// rebalancer-only).
    #[error("caller lacks the required role")]
    Unauthorized,

    /// Token balance too small for the requested movement.
    #[error("insufficient token balance")]
    InsufficientBalance,

    /// Spending allowance too small for the delegated movement.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The reserve cannot cover the requested payout.
    #[error("reserve cannot cover the requested payout")]
    InsufficientReserve,

    /// Minting would push total supply past the maximum.
    #[error("mint would exceed the maximum supply")]
    SupplyExceeded,

    /// Zero-value deposit or trade, or a trade so small it rounds to nothing.
    #[error("zero-value deposit or trade rejected")]
    ZeroAmount,

    /// Price table queried outside its covered supply domain.
    #[error("query outside the price table domain")]
    OutOfRange,

    /// Component wiring is incomplete; trading is not yet permitted.
    #[error("component wiring incomplete")]
    NotWired,

    /// Arithmetic exceeded the 256-bit intermediate range. Unreachable under
    /// the documented parameter bounds, surfaced instead of panicking.
    #[error("arithmetic overflow in price computation")]
    Overflow,
}

/// Errors detected while validating an offline-generated price table.
///
/// A table that fails validation is never accepted into the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table contains no entries.
    #[error("price table is empty")]
    Empty,

    /// The table exceeds the maximum entry count.
    #[error("price table exceeds the maximum entry count")]
    TooLarge,

    /// Cumulative supply is not strictly increasing, or a price column
    /// decreases, at the given entry.
    #[error("cumulative supply or price not monotonic at entry {index}")]
    NonMonotonic { index: usize },

    /// `sell_price + spread != buy_price`, or the sell price exceeds the buy
    /// price, at the given entry.
    #[error("spread inconsistent with buy/sell prices at entry {index}")]
    InvalidSpread { index: usize },

    /// A zero buy price at the given entry (the quote formulas divide by it).
    #[error("zero buy price at entry {index}")]
    ZeroPrice { index: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;

// ============================================================================
// Unit Tests
// ============================================================================
