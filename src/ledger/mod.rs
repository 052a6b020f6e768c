//! Token ledger: balances, allowances, and gated supply changes.
//!
//! The ledger is the single source of truth for token ownership. Supply only
//! moves through the wired exchange account: minting happens when a buy
//! settles and burning when a sell settles. Holders move their own balances
//! freely with [`transfer`](TokenLedger::transfer) and delegate spending with
//! [`approve`](TokenLedger::approve); the exchange burns sold tokens through
//! the allowance path, so a sell requires a prior approval.
//!
//! Wiring is staged: the ledger is constructed without an exchange identity
//! and the owner binds one afterwards. Until then every mint and burn fails
//! `Unauthorized`.

use std::collections::HashMap;

use crate::error::{ProtocolError, Result};
use crate::types::AccountId;

/// Token display name.
pub const TOKEN_NAME: &str = "GASToken";
/// Token ticker symbol.
pub const TOKEN_SYMBOL: &str = "GAST";
/// Fixed-point decimal places of the token.
pub const TOKEN_DECIMALS: u32 = 18;

/// Balances, allowances, and supply accounting.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    owner: AccountId,
    exchange: Option<AccountId>,
    max_supply: u128,
    total_supply: u128,
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
}

impl TokenLedger {
    /// Creates an empty ledger with a hard supply cap. No exchange is wired
    /// yet; supply cannot move until [`set_exchange`](Self::set_exchange).
    pub fn new(owner: AccountId, max_supply: u128) -> Self {
        Self {
            owner,
            exchange: None,
            max_supply,
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Binds the exchange account authorized to mint and burn. Owner only.
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

    /// Creates `amount` tokens for `to`. Exchange only.
    pub fn mint(&mut self, caller: AccountId, to: AccountId, amount: u128) -> Result<()> {
        if self.exchange != Some(caller) {
            return Err(ProtocolError::Unauthorized);
        }
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(ProtocolError::Overflow)?;
        if new_supply > self.max_supply {
            return Err(ProtocolError::SupplyExceeded);
        }
        self.total_supply = new_supply;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    /// Destroys `amount` tokens held by `from`. Exchange only.
    pub fn burn(&mut self, caller: AccountId, from: AccountId, amount: u128) -> Result<()> {
        if self.exchange != Some(caller) {
            return Err(ProtocolError::Unauthorized);
        }
        self.debit(from, amount)
    }

    /// Destroys `amount` tokens held by `from`, spending the allowance `from`
    /// granted to the caller. Exchange only; the allowance must cover the
    /// full amount.
    pub fn burn_from(&mut self, caller: AccountId, from: AccountId, amount: u128) -> Result<()> {
        if self.exchange != Some(caller) {
            return Err(ProtocolError::Unauthorized);
        }
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        let key = (from, caller);
        let allowed = self.allowances.get(&key).copied().unwrap_or(0);
        if allowed < amount {
            return Err(ProtocolError::InsufficientAllowance);
        }
        if self.balance_of(from) < amount {
            return Err(ProtocolError::InsufficientBalance);
        }
        self.allowances.insert(key, allowed - amount);
        self.debit(from, amount)
    }

    /// Moves `amount` tokens from the caller to `to`.
    pub fn transfer(&mut self, caller: AccountId, to: AccountId, amount: u128) -> Result<()> {
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.balance_of(caller) < amount {
            return Err(ProtocolError::InsufficientBalance);
        }
        if let Some(bal) = self.balances.get_mut(&caller) {
            *bal -= amount;
        }
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    /// Grants `spender` the right to move up to `amount` of the caller's
    /// tokens. Overwrites any prior grant.
    pub fn approve(&mut self, caller: AccountId, spender: AccountId, amount: u128) {
        self.allowances.insert((caller, spender), amount);
    }

    /// Remaining allowance `owner` has granted `spender`.
    #[inline]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Current balance of an account.
    #[inline]
    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Current total supply.
    #[inline]
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Hard supply cap.
    #[inline]
    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    /// Sum of all balances. Always equals the total supply.
    pub fn balances_total(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Iterates `(account, balance)` pairs in unspecified order.
    pub fn iter_balances(&self) -> impl Iterator<Item = (AccountId, u128)> + '_ {
        self.balances.iter().map(|(a, b)| (*a, *b))
    }

    /// Balance-checked debit plus supply reduction.
    fn debit(&mut self, from: AccountId, amount: u128) -> Result<()> {
        if amount == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.balance_of(from) < amount {
            return Err(ProtocolError::InsufficientBalance);
        }
        if let Some(bal) = self.balances.get_mut(&from) {
            *bal -= amount;
        }
        self.total_supply -= amount;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
