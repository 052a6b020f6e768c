//! Account identity.

/// Opaque identifier for an account in the economy.
///
/// Accounts identify both end users (token holders, traders) and deployed
/// components (the exchange and the rebalancer hold identities of their own so
/// other components can gate entry points on them). The newtype keeps account
/// identities from being confused with amounts or indices.
///
/// ## Example
///
/// ```
/// use gast_core::AccountId;
///
/// let alice = AccountId(100);
/// let bob = AccountId(101);
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_ordering_and_display() {
        let a = AccountId(1);
        let b = AccountId(2);
        assert!(a < b);
        assert_eq!(a.to_string(), "account#1");
    }
}
