//! Account model
//!
//! Represents the user's financial accounts (bank, credit card, investment)
//! as supplied by the data source, with their current balances.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Checking or savings account
    #[default]
    Bank,
    /// Credit card
    Credit,
    /// Brokerage / retirement account
    Investment,
}

impl AccountKind {
    pub fn all() -> &'static [Self] {
        &[Self::Bank, Self::Credit, Self::Investment]
    }

    /// Returns true if this account type carries debt as a negative balance
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Parse account kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" | "checking" | "savings" => Some(Self::Bank),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "investment" => Some(Self::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bank => "Bank",
            Self::Credit => "Credit Card",
            Self::Investment => "Investment",
        };
        f.pad(label)
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier (generated when a data file omits it)
    #[serde(default)]
    pub id: AccountId,

    /// Account name (e.g., "Main Checking")
    pub name: String,

    /// Institution holding the account
    #[serde(default)]
    pub institution: String,

    pub kind: AccountKind,

    /// Current balance (negative for debt)
    pub balance: Money,
}

impl Account {
    /// Create a new account
    pub fn new(
        name: impl Into<String>,
        institution: impl Into<String>,
        kind: AccountKind,
        balance: Money,
    ) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            institution: institution.into(),
            kind,
            balance,
        }
    }

    /// Replace the id (fixture data uses deterministic ids)
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = id;
        self
    }

    /// Whether `reference` names this account, either by its case-insensitive
    /// name or by its id (full UUID or `acc-` display form)
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        self.name.eq_ignore_ascii_case(reference)
            || self.id.to_string() == reference
            || reference
                .parse::<AccountId>()
                .map(|id| id == self.id)
                .unwrap_or(false)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(AccountKind::parse("bank"), Some(AccountKind::Bank));
        assert_eq!(AccountKind::parse("Savings"), Some(AccountKind::Bank));
        assert_eq!(AccountKind::parse("credit_card"), Some(AccountKind::Credit));
        assert_eq!(AccountKind::parse("crypto"), None);
    }

    #[test]
    fn test_liability() {
        assert!(AccountKind::Credit.is_liability());
        assert!(!AccountKind::Investment.is_liability());
    }

    #[test]
    fn test_matches_reference() {
        let account = Account::new(
            "Main Checking",
            "Bank of America",
            AccountKind::Bank,
            Money::zero(),
        )
        .with_id(AccountId::from_seq(1));
        assert!(account.matches_reference("main checking"));
        assert!(account.matches_reference("acc-00000001"));
        assert!(account.matches_reference("00000000-0000-0000-0000-000000000001"));
        assert!(!account.matches_reference("Savings"));
    }

    #[test]
    fn test_display() {
        let account = Account::new(
            "Credit Card",
            "Chase",
            AccountKind::Credit,
            Money::from_cents(-150000),
        );
        assert_eq!(account.to_string(), "Credit Card (Credit Card)");
    }

    #[test]
    fn test_serialization() {
        let account = Account::new(
            "Savings",
            "Wells Fargo",
            AccountKind::Bank,
            Money::from_cents(1000000),
        );
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"kind\":\"bank\""));
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }
}
