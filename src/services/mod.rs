//! Core services for finboard
//!
//! Stateless functions over borrowed records: the transaction filter, the
//! aggregator, and the budget and account helpers the reports build on.

pub mod account;
pub mod aggregate;
pub mod budget;
pub mod filter;

pub use account::AccountFilter;
pub use aggregate::{aggregate, net_savings, Aggregate, GroupBy, GroupKey};
pub use budget::{derive_budgets, BudgetTotals};
pub use filter::{filter, filter_refs, CriteriaInput, FilterCriteria};
