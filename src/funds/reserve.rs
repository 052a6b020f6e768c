//! Short-term liquidity pool backing sell payouts.

use crate::error::{ProtocolError, Result};
use crate::types::AccountId;

/// Fund pool that every sell payout is drawn from.
///
/// Deposits are open (the exchange routes buy payments here, the treasury
/// routes rebalancing transfers here); withdrawals are exchange-only so funds
/// can leave the pool solely as priced sell payouts or treasury-bound
/// rebalancing moves.
#[derive(Debug, Clone)]
pub struct Reserve {
    owner: AccountId,
    exchange: Option<AccountId>,
    balance: u128,
}

impl Reserve {
    /// Creates an empty reserve. No exchange is wired yet.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            exchange: None,
            balance: 0,
        }
    }

    /// Binds the exchange account authorized to withdraw. Owner only.
    pub fn set_exchange(&mut self, caller: AccountId, exchange: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        self.exchange = Some(exchange);
        Ok(())
    }

    /// The wired exchange account, if any.
    #[inline]
    pub fn exchange(&self) -> Option<AccountId> {
        self.exchange
    }

    /// Accepts a deposit from any caller.
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

    /// Releases `amount` from the pool. Exchange only.
    pub fn withdraw(&mut self, caller: AccountId, amount: u128) -> Result<()> {
        if self.exchange != Some(caller) {
            return Err(ProtocolError::Unauthorized);
        }
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.balance < amount {
            return Err(ProtocolError::InsufficientReserve);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Current pool balance.
    #[inline]
    pub fn balance(&self) -> u128 {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCALE;

    const OWNER: AccountId = AccountId(1);
    const EXCHANGE: AccountId = AccountId(2);

    #[test]
    fn test_open_deposit_gated_withdraw() {
        let mut reserve = Reserve::new(OWNER);
        reserve.deposit(10 * SCALE).unwrap();
        assert_eq!(reserve.balance(), 10 * SCALE);
        // Unwired: nobody can withdraw.
        assert_eq!(
            reserve.withdraw(OWNER, SCALE),
            Err(ProtocolError::Unauthorized)
        );
        reserve.set_exchange(OWNER, EXCHANGE).unwrap();
        reserve.withdraw(EXCHANGE, 4 * SCALE).unwrap();
        assert_eq!(reserve.balance(), 6 * SCALE);
    }

    #[test]
    fn test_withdraw_beyond_balance_rejected() {
        let mut reserve = Reserve::new(OWNER);
        reserve.set_exchange(OWNER, EXCHANGE).unwrap();
        reserve.deposit(SCALE).unwrap();
        assert_eq!(
            reserve.withdraw(EXCHANGE, 2 * SCALE),
            Err(ProtocolError::InsufficientReserve)
        );
        assert_eq!(reserve.balance(), SCALE);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut reserve = Reserve::new(OWNER);
        reserve.set_exchange(OWNER, EXCHANGE).unwrap();
        assert_eq!(reserve.deposit(0), Err(ProtocolError::ZeroAmount));
        assert_eq!(
            reserve.withdraw(EXCHANGE, 0),
            Err(ProtocolError::ZeroAmount)
        );
    }
}
