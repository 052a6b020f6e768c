//! Trade orchestration.
//!
//! The [`Exchange`] is the only component that moves value between the
//! others. A buy takes a payment, mints tokens against the pricing backend's
//! quote, and splits the payment between the reserve and the treasury; a sell
//! burns tokens through the seller's allowance and pays out of the reserve.
//! The exchange holds no funds and no tokens itself.
//!
//! ## Atomicity
//!
//! Every entry point performs all fallible checks and quote computations
//! before its first state mutation, so an `Err` return always leaves the
//! ledger and both pools exactly as they were. The mutation sequences
//! themselves cannot fail once the checks pass.
//!
//! ## Fund split
//!
//! The treasury's cut of a buy payment is the spread fraction of the
//! execution price:
//!
//! ```text
//! treasury_share = funds * spread(s) / buy_price(s)
//! reserve_share  = funds - treasury_share
//! ```
//!
//! Under a 10% spread the treasury takes 10% of every payment and the
//! reserve keeps 90%, which is exactly what funds the sell side: tokens
//! bought back at `sell_price = 0.9 * buy_price` never need more than the
//! reserve's share of the payment that minted them.

use sha2::{Digest, Sha256};

use crate::error::{ProtocolError, Result};
use crate::funds::{Reserve, Treasury};
use crate::ledger::TokenLedger;
use crate::pricing::PricingSource;
use crate::types::{mul_div, AccountId, TradeReceipt, TradeSide};

/// Buy/sell orchestrator over a pluggable pricing backend.
pub struct Exchange {
    account: AccountId,
    owner: AccountId,
    treasury: Option<AccountId>,
    pricing: Box<dyn PricingSource>,
}

impl Exchange {
    /// Creates an exchange with its own account identity and a pricing
    /// backend. The treasury is unbound; trading fails `NotWired` until
    /// [`update_treasury`](Self::update_treasury).
    pub fn new(account: AccountId, owner: AccountId, pricing: Box<dyn PricingSource>) -> Self {
        Self {
            account,
            owner,
            treasury: None,
            pricing,
        }
    }

    /// The exchange's own account identity (the one other components gate
    /// their entry points on).
    #[inline]
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// The pricing backend serving quotes.
    #[inline]
    pub fn pricing(&self) -> &dyn PricingSource {
        self.pricing.as_ref()
    }

    /// Binds the treasury account and opens trading. Owner only.
    pub fn update_treasury(&mut self, caller: AccountId, treasury: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(ProtocolError::Unauthorized);
        }
        self.treasury = Some(treasury);
        Ok(())
    }

    /// Executes a buy: accepts `funds`, mints the quoted tokens to `buyer`,
    /// and splits the payment between reserve and treasury.
    pub fn buy(
        &self,
        ledger: &mut TokenLedger,
        reserve: &mut Reserve,
        treasury: &mut Treasury,
        buyer: AccountId,
        funds: u128,
    ) -> Result<TradeReceipt> {
        if funds == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.treasury.is_none() {
            return Err(ProtocolError::NotWired);
        }
        if ledger.exchange() != Some(self.account) {
            return Err(ProtocolError::NotWired);
        }
        let supply = ledger.total_supply();
        let tokens = self.pricing.buy_quote(supply, funds)?;
        let new_supply = supply.checked_add(tokens).ok_or(ProtocolError::Overflow)?;
        // Crossing either cap rejects the whole trade; no partial fill.
        if new_supply > self.pricing.max_supply() || new_supply > ledger.max_supply() {
            return Err(ProtocolError::SupplyExceeded);
        }
        let price = self.pricing.buy_price(supply)?;
        let spread = self.pricing.spread(supply)?;
        let treasury_share = mul_div(funds, spread, price).ok_or(ProtocolError::Overflow)?;
        let reserve_share = funds - treasury_share;

        ledger.mint(self.account, buyer, tokens)?;
        if reserve_share > 0 {
            reserve.deposit(reserve_share)?;
        }
        if treasury_share > 0 {
            treasury.deposit(treasury_share)?;
        }
        Ok(TradeReceipt {
            side: TradeSide::Buy,
            account: buyer,
            funds,
            tokens,
            price,
            new_supply,
            reserve_share,
            treasury_share,
        })
    }

    /// Executes a sell: burns `tokens` through the seller's allowance and
    /// pays the quoted funds out of the reserve.
    ///
    /// Requires a prior `approve(seller -> exchange)` covering the amount.
    pub fn sell(
        &self,
        ledger: &mut TokenLedger,
        reserve: &mut Reserve,
        seller: AccountId,
        tokens: u128,
    ) -> Result<TradeReceipt> {
        if tokens == 0 {
            return Err(ProtocolError::ZeroAmount);
        }
        if self.treasury.is_none() {
            return Err(ProtocolError::NotWired);
        }
        // The burn and the payout must both be ours to perform before either
        // happens.
        if ledger.exchange() != Some(self.account) || reserve.exchange() != Some(self.account) {
            return Err(ProtocolError::NotWired);
        }
        if ledger.balance_of(seller) < tokens {
            return Err(ProtocolError::InsufficientBalance);
        }
        if ledger.allowance(seller, self.account) < tokens {
            return Err(ProtocolError::InsufficientAllowance);
        }
        let supply = ledger.total_supply();
        let funds = self.pricing.sell_quote(supply, tokens)?;
        if reserve.balance() < funds {
            return Err(ProtocolError::InsufficientReserve);
        }
        let price = self.pricing.sell_price(supply)?;

        ledger.burn_from(self.account, seller, tokens)?;
        reserve.withdraw(self.account, funds)?;
        Ok(TradeReceipt {
            side: TradeSide::Sell,
            account: seller,
            funds,
            tokens,
            price,
            new_supply: supply - tokens,
            reserve_share: 0,
            treasury_share: 0,
        })
    }

    /// Deterministic digest of the full economic state.
    ///
    /// Hashes the total supply, every nonzero balance in account order, and
    /// both pool balances, all little-endian. Two deployments that processed
    /// the same operations produce the same root.
    pub fn state_root(
        &self,
        ledger: &TokenLedger,
        reserve: &Reserve,
        treasury: &Treasury,
    ) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(ledger.total_supply().to_le_bytes());
        let mut balances: Vec<(AccountId, u128)> =
            ledger.iter_balances().filter(|(_, b)| *b > 0).collect();
        balances.sort_unstable_by_key(|(a, _)| *a);
        for (account, balance) in balances {
            hasher.update(account.0.to_le_bytes());
            hasher.update(balance.to_le_bytes());
        }
        hasher.update(reserve.balance().to_le_bytes());
        hasher.update(treasury.balance().to_le_bytes());
        hasher.finalize().into()
    }

    /// Hex rendering of [`state_root`](Self::state_root) for logs and
    /// assertions.
    pub fn state_root_hex(
        &self,
        ledger: &TokenLedger,
        reserve: &Reserve,
        treasury: &Treasury,
    ) -> String {
        hex::encode(self.state_root(ledger, reserve, treasury))
    }
}

impl std::fmt::Debug for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("account", &self.account)
            .field("owner", &self.owner)
            .field("treasury", &self.treasury)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
