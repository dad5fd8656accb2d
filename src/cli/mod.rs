//! CLI command handlers
//!
//! Bridges clap argument parsing with the services and reports. Every
//! handler gets the loaded dataset and settings; none of them write the
//! dataset back.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FinboardError, FinboardResult};
use crate::models::Account;
use crate::services::filter::{CriteriaInput, FilterCriteria};

/// Transaction filter flags shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exact date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Category key or label ("all" for every category)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Case-insensitive description search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum signed amount, inclusive (e.g. -100)
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Maximum signed amount, inclusive (e.g. 0 for outflows only)
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Month ("2023-06") or year ("2023")
    #[arg(short, long)]
    pub period: Option<String>,

    /// Account name or ID
    #[arg(short, long)]
    pub account: Option<String>,
}

impl FilterArgs {
    /// Validate the flags into filter criteria
    pub fn to_criteria(&self, accounts: &[Account]) -> FinboardResult<FilterCriteria> {
        let input = CriteriaInput {
            date: self.date.clone(),
            category: self.category.clone(),
            search: self.search.clone(),
            min_amount: self.min.clone(),
            max_amount: self.max.clone(),
            period: self.period.clone(),
        };
        let mut criteria = input.parse()?;

        if let Some(reference) = self.account.as_deref().filter(|s| !s.trim().is_empty()) {
            let account = accounts
                .iter()
                .find(|a| a.matches_reference(reference))
                .ok_or_else(|| FinboardError::NotFound {
                    entity_type: "Account",
                    identifier: reference.to_string(),
                })?;
            criteria = criteria.account(account.id);
        }
        Ok(criteria)
    }
}

/// Write a report export to `path`
pub(crate) fn export_to_file<F>(path: &Path, export: F) -> FinboardResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> FinboardResult<()>,
{
    let file = File::create(path).map_err(|e| {
        FinboardError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| FinboardError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryFilter, Money};
    use crate::storage::Dataset;

    #[test]
    fn test_filter_args_to_criteria() {
        let args = FilterArgs {
            category: Some("food".into()),
            min: Some("-80".into()),
            ..FilterArgs::default()
        };
        let criteria = args.to_criteria(&[]).unwrap();
        assert_eq!(criteria.category, CategoryFilter::Only(Category::Food));
        assert_eq!(criteria.min_amount, Some(Money::from_cents(-8000)));
    }

    #[test]
    fn test_filter_args_resolve_account() {
        let data = Dataset::sample();
        let args = FilterArgs {
            account: Some("savings".into()),
            ..FilterArgs::default()
        };
        let criteria = args.to_criteria(&data.accounts).unwrap();
        assert_eq!(criteria.account_id, Some(data.accounts[1].id));

        let args = FilterArgs {
            account: Some("Brokerage".into()),
            ..FilterArgs::default()
        };
        assert!(args.to_criteria(&data.accounts).unwrap_err().is_not_found());
    }
}
