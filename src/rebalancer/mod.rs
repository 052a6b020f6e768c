//! Reserve-to-total ratio monitoring.
//!
//! The rebalancer watches the split between the two fund pools. The
//! reserve-to-total ratio (RTR) is the reserve's percentage of the combined
//! balances; when a trigger finds it outside `target ± tolerance` the
//! rebalancer invokes the treasury's transfer to restore the target split.
//! Triggers are explicit owner calls, not automatic hooks on trades.

use crate::error::{ProtocolError, Result};
use crate::funds::{Reserve, Treasury};
use crate::types::{mul_div, AccountId, RebalanceReport};

/// Band check and trigger authority for the pool split.
#[derive(Debug, Clone)]
pub struct Rebalancer {
    owner: AccountId,
    account: AccountId,
    target_rtr: u32,
    tolerance: u32,
}

impl Rebalancer {
    /// Creates a rebalancer with its own account identity (the one the
    /// treasury gates its transfer on), a target RTR, and a tolerance band,
    /// both in percent. Fails `OutOfRange` above 100.
    pub fn new(
        owner: AccountId,
        account: AccountId,
        target_rtr: u32,
        tolerance: u32,
    ) -> Result<Self> {
        if target_rtr > 100 || tolerance > 100 {
            return Err(ProtocolError::OutOfRange);
        }
        Ok(Self {
            owner,
            account,
            target_rtr,
            tolerance,
        })
    }

    /// The rebalancer's own account identity.
    #[inline]
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// Target reserve-to-total ratio in percent.
    #[inline]
    pub fn target_rtr(&self) -> u32 {
        self.target_rtr
    }

    /// Tolerance band half-width in percent.
    #[inline]
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// True when the current split is within `target ± tolerance`.
    ///
    /// Empty pools count as balanced; the ratio floors, so a reserve of 1
    /// against a treasury of 10 reads as 9 percent.
    pub fn check_rtr(&self, reserve_balance: u128, treasury_balance: u128) -> bool {
        let total = reserve_balance.saturating_add(treasury_balance);
        if total == 0 {
            return true;
        }
        let rtr = mul_div(reserve_balance, 100, total).unwrap_or(0);
        let low = self.target_rtr.saturating_sub(self.tolerance) as u128;
        let high = (self.target_rtr + self.tolerance) as u128;
        rtr >= low && rtr <= high
    }

    /// Checks the band and, when the split has drifted out of it, performs
    /// the treasury transfer restoring the target. Owner only.
    ///
    /// Within-band triggers are recorded no-ops, not errors.
    pub fn trigger_rebalance(
        &self,
        caller: AccountId,
        treasury: &mut Treasury,
        reserve: &mut Reserve,
    ) -> Result<RebalanceReport> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        let pre_reserve = reserve.balance();
        let pre_treasury = treasury.balance();
        let mut acted = false;
        if !self.check_rtr(pre_reserve, pre_treasury) {
            let transfer = treasury.rebalance(self.account, reserve)?;
            acted = transfer.amount > 0;
        }
        Ok(RebalanceReport {
            pre_reserve,
            pre_treasury,
            post_reserve: reserve.balance(),
            post_treasury: treasury.balance(),
            target_rtr: self.target_rtr,
            acted,
        })
    }

    /// Retargets the band center. Owner only; capped at 100 percent.
    pub fn update_target_rtr(&mut self, caller: AccountId, target_rtr: u32) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        if target_rtr > 100 {
            return Err(ProtocolError::OutOfRange);
        }
        self.target_rtr = target_rtr;
        Ok(())
    }

    /// Resizes the band. Owner only; capped at 100 percent.
    pub fn update_tolerance(&mut self, caller: AccountId, tolerance: u32) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        if tolerance > 100 {
            return Err(ProtocolError::OutOfRange);
        }
        self.tolerance = tolerance;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
