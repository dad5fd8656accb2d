//! Account filter
//!
//! Narrows the account list by kind and name, keeping input order.

use log::debug;

use crate::models::{Account, AccountKind, Money};

/// Options for filtering accounts
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub kind: Option<AccountKind>,
    /// Case-insensitive name substring
    pub search: Option<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: AccountKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        if let Some(kind) = self.kind {
            if account.kind != kind {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            if !account
                .name
                .to_lowercase()
                .contains(&term.trim().to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Apply the filter to a slice
    pub fn apply<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        let matched: Vec<&Account> = accounts.iter().filter(|a| self.matches(a)).collect();
        debug!(
            "account filter: {} of {} accounts matched",
            matched.len(),
            accounts.len()
        );
        matched
    }
}

/// Sum of balances (liabilities count negatively through their sign)
pub fn total_balance<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Money {
    accounts.into_iter().map(|a| a.balance).sum()
}
