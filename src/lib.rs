//! # gast-core
//!
//! Deterministic bonding-curve token economy: a token whose marginal price is
//! a function of its total supply, bought and sold through an exchange that
//! routes incoming funds between a liquidity reserve and a long-horizon
//! treasury, with a rebalancer keeping the two pools at a target split.
//!
//! ## Components
//!
//! - [`pricing`]: marginal prices and quotes, as a closed-form
//!   [`CurveEngine`] or a precomputed [`PriceTable`], behind the
//!   [`PricingSource`] trait
//! - [`ledger`]: balances, allowances, and exchange-gated supply changes
//! - [`funds`]: the [`Reserve`] (backs sell payouts) and the [`Treasury`]
//!   (accumulates the spread cut)
//! - [`exchange`]: the buy/sell orchestrator and the state root
//! - [`rebalancer`]: reserve-to-total ratio monitoring and the transfer
//!   trigger
//!
//! ## Guarantees
//!
//! - **Determinism**: identical operation sequences produce identical state,
//!   byte for byte; the state root makes this checkable.
//! - **No floating point**: every amount and price is a `u128` scaled by
//!   10^18; multiply-then-divide runs through 256-bit intermediates.
//! - **Atomic operations**: entry points are synchronous and check-first; an
//!   `Err` never leaves partial state behind.
//! - **Conservation**: the sum of balances always equals the total supply,
//!   and funds paid in minus funds paid out always equals reserve plus
//!   treasury.
//!
//! ## Example
//!
//! ```
//! use gast_core::{
//!     AccountId, CurveEngine, CurveParameters, Exchange, Reserve, TokenLedger, Treasury, SCALE,
//! };
//!
//! let owner = AccountId(1);
//! let exchange_id = AccountId(2);
//! let buyer = AccountId(100);
//!
//! let params = CurveParameters::default();
//! let mut exchange = Exchange::new(exchange_id, owner, Box::new(CurveEngine::new(params)));
//! let mut ledger = TokenLedger::new(owner, params.max_supply);
//! let mut reserve = Reserve::new(owner);
//! let mut treasury = Treasury::new(owner, 10)?;
//!
//! // Wire the deployment, then trade.
//! ledger.set_exchange(owner, exchange_id)?;
//! reserve.set_exchange(owner, exchange_id)?;
//! exchange.update_treasury(owner, AccountId(4))?;
//!
//! let receipt = exchange.buy(&mut ledger, &mut reserve, &mut treasury, buyer, SCALE)?;
//! assert_eq!(receipt.tokens, 100 * SCALE);
//! # Ok::<(), gast_core::ProtocolError>(())
//! ```

pub mod error;
pub mod exchange;
pub mod funds;
pub mod ledger;
pub mod pricing;
pub mod rebalancer;
pub mod types;

pub use error::{ProtocolError, Result, TableError};
pub use exchange::Exchange;
pub use funds::{Direction, RebalanceTransfer, Reserve, Treasury};
pub use ledger::{TokenLedger, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
pub use pricing::{
    CurveEngine, CurveParameters, PriceDataEntry, PriceTable, PricingSource, MAX_TABLE_ENTRIES,
};
pub use rebalancer::Rebalancer;
pub use types::{
    from_fixed, from_fixed_trimmed, mul_div, to_fixed, AccountId, RebalanceReport, TradeReceipt,
    TradeSide, SCALE,
};
