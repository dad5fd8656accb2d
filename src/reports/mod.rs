//! Reports module for finboard
//!
//! Each report is generated from borrowed records, rendered for the
//! terminal with `format_terminal`, and exported with `export_csv`.

pub mod budget_overview;
pub mod cashflow;
pub mod net_worth;
pub mod spending;

pub use budget_overview::{BudgetOverviewReport, BudgetReportRow};
pub use cashflow::{CashflowReport, CashflowRow};
pub use net_worth::{AccountGroup, NetWorthReport, NetWorthSummary};
pub use spending::{SpendingByCategory, SpendingReport};
