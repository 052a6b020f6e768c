//! Core data types shared across the economy.
//!
//! This module contains the leaf types every component speaks in:
//!
//! - [`AccountId`]: opaque account identity used for balances and role gating
//! - [`amount`]: 10^18 fixed-point amount helpers and overflow-free mul-div
//! - [`TradeReceipt`] / [`RebalanceReport`]: immutable records emitted by the
//!   exchange and the rebalancer

pub mod account;
pub mod amount;
pub mod receipt;

pub use account::AccountId;
pub use amount::{fixed_to_decimal, from_fixed, from_fixed_trimmed, mul_div, to_fixed, SCALE};
pub use receipt::{RebalanceReport, TradeReceipt, TradeSide};
