//! Long-horizon fund pool and the rebalancing transfer.

use crate::error::{ProtocolError, Result};
use crate::funds::Reserve;
use crate::types::{mul_div, AccountId};

/// Which pool a rebalancing transfer moved funds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Treasury topped up the reserve.
    ToReserve,
    /// Excess reserve was skimmed into the treasury.
    ToTreasury,
}

/// Outcome of a single [`Treasury::rebalance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceTransfer {
    /// Where the funds went.
    pub direction: Direction,
    /// Amount moved; zero when the pools were already at the target split.
    pub amount: u128,
}

/// Long-horizon holdings, plus the authority to move funds between itself
/// and the reserve.
///
/// The treasury accumulates the spread cut of every buy. Funds leave it two
/// ways only: owner withdrawals, and rebalancing transfers toward the reserve.
/// The transfer logic lives here because the treasury knows the target split
/// (`reserve_ratio`); the rebalancer component decides when the split has
/// drifted far enough to act.
#[derive(Debug, Clone)]
pub struct Treasury {
    owner: AccountId,
    exchange: Option<AccountId>,
    rebalancer: Option<AccountId>,
    reserve_ratio: u32,
    balance: u128,
}

impl Treasury {
    /// Creates an empty treasury targeting `reserve_ratio` percent of the
    /// combined pools in the reserve. Fails `OutOfRange` above 100.
    pub fn new(owner: AccountId, reserve_ratio: u32) -> Result<Self> {
        if reserve_ratio > 100 {
            return Err(ProtocolError::OutOfRange);
        }
        Ok(Self {
            owner,
            exchange: None,
            rebalancer: None,
            reserve_ratio,
            balance: 0,
        })
    }

    /// Accepts a deposit from any caller. Zero deposits are rejected.
    pub fn deposit(&mut self, amount: u128) -> Result<()> {
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ProtocolError::Overflow)?;
        Ok(())
    }

    /// Releases `amount` to the owner. Owner only.
    pub fn withdraw(&mut self, caller: AccountId, amount: u128) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.balance < amount {
            return Err(ProtocolError::InsufficientBalance);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Retargets the reserve share. Owner only; capped at 100 percent.
    pub fn update_reserve_ratio(&mut self, caller: AccountId, reserve_ratio: u32) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        if reserve_ratio > 100 {
            return Err(ProtocolError::OutOfRange);
        }
        self.reserve_ratio = reserve_ratio;
        Ok(())
    }

    /// Binds the rebalancer account authorized to trigger transfers. Owner
    /// only.
    pub fn set_rebalancer(&mut self, caller: AccountId, rebalancer: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        self.rebalancer = Some(rebalancer);
        Ok(())
    }

    /// Binds the exchange identity used to draw from the reserve when
    /// skimming excess into the treasury. Owner only.
    pub fn update_exchange(&mut self, caller: AccountId, exchange: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        self.exchange = Some(exchange);
        Ok(())
    }

    /// Moves funds between the pools until the reserve holds
    /// `reserve_ratio` percent of the combined balance. Rebalancer only.
    ///
    /// Topping up the reserve is capped by the treasury balance; skimming the
    /// reserve requires the exchange identity to be wired (the reserve only
    /// releases funds to it) and fails `NotWired` otherwise.
    pub fn rebalance(&mut self, caller: AccountId, reserve: &mut Reserve) -> Result<RebalanceTransfer> {
        if self.rebalancer != Some(caller) {
            return Err(ProtocolError::Unauthorized);
        }
        let r = reserve.balance();
        let total = r.checked_add(self.balance).ok_or(ProtocolError::Overflow)?;
        let desired = mul_div(total, self.reserve_ratio as u128, 100).ok_or(ProtocolError::Overflow)?;
        if desired > r {
            let amount = (desired - r).min(self.balance);
            if amount > 0 {
                reserve.deposit(amount)?;
                self.balance -= amount;
            }
            Ok(RebalanceTransfer {
                direction: Direction::ToReserve,
                amount,
            })
        } else {
            let amount = r - desired;
            if amount > 0 {
                let exchange = self.exchange.ok_or(ProtocolError::NotWired)?;
                reserve.withdraw(exchange, amount)?;
                self.balance += amount;
            }
            Ok(RebalanceTransfer {
                direction: Direction::ToTreasury,
                amount,
            })
        }
    }

    /// Current pool balance.
    #[inline]
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Target reserve share in percent.
    #[inline]
    pub fn reserve_ratio(&self) -> u32 {
        self.reserve_ratio
    }

    /// The wired rebalancer account, if any.
    #[inline]
    pub fn rebalancer(&self) -> Option<AccountId> {
        self.rebalancer
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
