//! Fund-holding components.
//!
//! Incoming trade payments are split between two pools:
//!
//! - [`Reserve`]: short-term liquidity that backs sell payouts
//! - [`Treasury`]: long-horizon holdings, tapped only by rebalancing and
//!   owner withdrawals
//!
//! The treasury also owns the rebalancing transfer itself (see
//! [`Treasury::rebalance`]); the rebalancer component only decides *when* to
//! trigger it.

pub mod reserve;
pub mod treasury;

pub use reserve::Reserve;
pub use treasury::{Direction, RebalanceTransfer, Treasury};
