//! Immutable records emitted by state-changing operations.
//!
//! A [`TradeReceipt`] is produced by every successful exchange trade and a
//! [`RebalanceReport`] by every rebalancer trigger. Receipts carry everything
//! an auditor needs to replay the operation against a prior snapshot; they are
//! plain values and never feed back into state.

use crate::types::AccountId;

/// Direction of an exchange trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    /// Funds in, tokens minted to the buyer.
    Buy,
    /// Tokens burned from the seller, funds paid out of the reserve.
    Sell,
}

/// Record of a single executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeReceipt {
    /// Buy or sell.
    pub side: TradeSide,
    /// The trading account.
    pub account: AccountId,
    /// Funds moved: payment received (buy) or payout sent (sell).
    pub funds: u128,
    /// Tokens moved: minted (buy) or burned (sell).
    pub tokens: u128,
    /// Marginal price the trade executed at (pre-trade supply).
    pub price: u128,
    /// Total token supply after the trade settled.
    pub new_supply: u128,
    /// Portion of a buy payment routed to the reserve (zero on sells).
    pub reserve_share: u128,
    /// Portion of a buy payment routed to the treasury (zero on sells).
    pub treasury_share: u128,
}

/// Record of a rebalancer trigger, whether or not funds moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceReport {
    /// Reserve balance before the trigger.
    pub pre_reserve: u128,
    /// Treasury balance before the trigger.
    pub pre_treasury: u128,
    /// Reserve balance after the trigger.
    pub post_reserve: u128,
    /// Treasury balance after the trigger.
    pub post_treasury: u128,
    /// Target reserve-to-total ratio in percent at trigger time.
    pub target_rtr: u32,
    /// Whether the ratio was out of band and a transfer was performed.
    pub acted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_receipt_shares_cover_funds() {
        let r = TradeReceipt {
            side: TradeSide::Buy,
            account: AccountId(100),
            funds: 1_000,
            tokens: 100_000,
            price: 10,
            new_supply: 100_000,
            reserve_share: 900,
            treasury_share: 100,
        };
        assert_eq!(r.reserve_share + r.treasury_share, r.funds);
    }

    #[test]
    fn test_noop_report() {
        let report = RebalanceReport {
            pre_reserve: 10,
            pre_treasury: 90,
            post_reserve: 10,
            post_treasury: 90,
            target_rtr: 10,
            acted: false,
        };
        assert!(!report.acted);
        assert_eq!(report.pre_reserve, report.post_reserve);
    }
}
