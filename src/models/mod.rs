//! Core data models for finboard
//!
//! The records the data source supplies (transactions, accounts, budgets)
//! and the small value types they are built from.

pub mod account;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use budget::{Budget, BudgetLimit, BudgetStatus, BudgetThresholds, DEFAULT_NEARING_LIMIT_RATIO};
pub use category::{Category, CategoryFilter};
pub use ids::{AccountId, TransactionId};
pub use money::Money;
pub use period::{Granularity, Period};
pub use transaction::{FieldError, Transaction, TransactionDraft};
