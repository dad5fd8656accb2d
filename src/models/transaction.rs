//! Transaction model
//!
//! A transaction is an immutable, dated, signed money movement with one
//! category. New records enter through [`TransactionDraft`], which holds the
//! raw form input and performs the required-field validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::category::Category;
use super::ids::{AccountId, TransactionId};
use super::money::Money;
use crate::error::{FinboardError, FinboardResult};

/// Minimum description length accepted for new records
pub const MIN_DESCRIPTION_LEN: usize = 2;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (generated when a data file omits it)
    #[serde(default)]
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description
    pub description: String,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    pub category: Category,

    /// The account this transaction belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,

    /// Marked as a repeating payment when entered
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: Category,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            amount,
            category,
            account_id: None,
            is_recurring: false,
        }
    }

    /// Replace the id (fixture data uses deterministic ids)
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Validate the record
    ///
    /// A zero amount is rejected: every aggregate classifies records as
    /// inflow or outflow by sign.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category.key()
        )
    }
}

/// Validation errors for stored transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "Transaction amount cannot be zero"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

impl From<TransactionValidationError> for FinboardError {
    fn from(err: TransactionValidationError) -> Self {
        FinboardError::Validation(err.to_string())
    }
}

/// One failed field of a new-transaction form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw input of the "add transaction" form
///
/// Every field is kept as entered; [`TransactionDraft::validate`] reports all
/// problems at once and [`TransactionDraft::build`] produces the record.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    /// Account name or id
    pub account: Option<String>,
    pub amount: String,
    /// Date as YYYY-MM-DD
    pub date: Option<String>,
    pub description: String,
    /// Category key or label
    pub category: Option<String>,
    pub is_recurring: bool,
}

impl TransactionDraft {
    /// Check every field, collecting one error per failing field
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if is_blank(&self.account) {
            errors.push(FieldError {
                field: "account",
                message: "Please select an account.",
            });
        }

        match Money::parse(&self.amount) {
            Ok(amount) if !amount.is_zero() => {}
            _ => errors.push(FieldError {
                field: "amount",
                message: "Amount must be a non-zero number.",
            }),
        }

        match self.date.as_deref().map(str::trim) {
            Some(date) if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() => {}
            _ => errors.push(FieldError {
                field: "date",
                message: "A date of transaction is required.",
            }),
        }

        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(FieldError {
                field: "description",
                message: "Description must be at least 2 characters.",
            });
        }

        let category_ok = self
            .category
            .as_deref()
            .map(|c| c.parse::<Category>().is_ok())
            .unwrap_or(false);
        if !category_ok {
            errors.push(FieldError {
                field: "category",
                message: "Please select a category.",
            });
        }

        errors
    }

    /// Validate and turn the draft into a transaction
    ///
    /// The account is resolved against `accounts` by id or case-insensitive
    /// name.
    pub fn build(&self, accounts: &[Account]) -> FinboardResult<Transaction> {
        let errors = self.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FinboardError::Validation(joined));
        }

        let account_ref = self.account.as_deref().unwrap_or_default().trim();
        let account = accounts
            .iter()
            .find(|a| a.matches_reference(account_ref))
            .ok_or_else(|| FinboardError::NotFound {
                entity_type: "Account",
                identifier: account_ref.to_string(),
            })?;

        let amount = Money::parse(&self.amount)?;
        let raw_date = self.date.as_deref().unwrap_or_default().trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|e| FinboardError::Validation(format!("Invalid date: {}", e)))?;
        let category: Category = self.category.as_deref().unwrap_or_default().parse()?;

        Ok(Transaction::new(date, self.description.trim(), amount, category)
            .with_account(account.id)
            .recurring(self.is_recurring))
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountKind;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn grocery() -> Transaction {
        Transaction::new(june(1), "Grocery Store", Money::from_cents(-7550), Category::Food)
    }

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            account: Some("Main Checking".into()),
            amount: "-75.50".into(),
            date: Some("2023-06-01".into()),
            description: "Grocery Store".into(),
            category: Some("food".into()),
            is_recurring: false,
        }
    }

    #[test]
    fn test_inflow_outflow() {
        let inflow = Transaction::new(
            june(2),
            "Salary Deposit",
            Money::from_cents(300000),
            Category::Income,
        );
        assert!(inflow.is_inflow());
        assert!(!inflow.is_outflow());

        let outflow = Transaction::new(
            june(3),
            "Electric Bill",
            Money::from_cents(-12000),
            Category::Utilities,
        );
        assert!(outflow.is_outflow());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let txn = Transaction::new(june(1), "Nothing", Money::zero(), Category::Other);
        assert_eq!(txn.validate(), Err(TransactionValidationError::ZeroAmount));
    }

    #[test]
    fn test_display() {
        let txn = grocery();
        assert_eq!(txn.to_string(), "2023-06-01 Grocery Store -$75.50 (food)");
    }

    #[test]
    fn test_draft_valid() {
        let accounts = vec![Account::new(
            "Main Checking",
            "Bank of America",
            AccountKind::Bank,
            Money::zero(),
        )];
        let txn = valid_draft().build(&accounts).unwrap();
        assert_eq!(txn.amount, Money::from_cents(-7550));
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.account_id, Some(accounts[0].id));
        assert_eq!(txn.date, june(1));
        assert!(!txn.is_recurring);
    }

    #[test]
    fn test_draft_keeps_recurring_flag() {
        let accounts = vec![Account::new(
            "Main Checking",
            "Bank of America",
            AccountKind::Bank,
            Money::zero(),
        )];
        let mut draft = valid_draft();
        draft.is_recurring = true;
        let txn = draft.build(&accounts).unwrap();
        assert!(txn.is_recurring);

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"is_recurring\":true"));
    }

    #[test]
    fn test_draft_reports_every_missing_field() {
        let draft = TransactionDraft::default();
        let fields: Vec<_> = draft.validate().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["account", "amount", "date", "description", "category"]
        );
    }

    #[test]
    fn test_draft_rejects_zero_and_non_numeric_amounts() {
        for amount in ["0", "0.00", "abc", ""] {
            let mut draft = valid_draft();
            draft.amount = amount.into();
            let errors = draft.validate();
            assert_eq!(errors.len(), 1, "amount {:?}", amount);
            assert_eq!(errors[0].field, "amount");
        }
    }

    #[test]
    fn test_draft_build_error_is_validation() {
        let mut draft = valid_draft();
        draft.description = "x".into();
        let err = draft.build(&[]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_draft_unknown_account() {
        let err = valid_draft().build(&[]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_serialization() {
        let txn = grocery();
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("account_id"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, back);
    }
}
