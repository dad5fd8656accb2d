//! Dataset loading
//!
//! A dataset is the whole set of records a command works on. It is loaded
//! once, validated, and then only borrowed by the services.
//!
//! JSON and YAML files hold all three record lists; amounts are integer
//! cents. A CSV file holds transactions only, one per row with the columns
//! `date,description,amount,category` and decimal amounts.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::file_io::{open_required, read_json_required, read_yaml_required, DataFormat};
use super::sample;
use crate::config::Settings;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Account, Budget, Category, Money, Transaction, TransactionId};

/// Records supplied by the data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Dataset {
    /// The built-in placeholder data
    pub fn sample() -> Self {
        sample::dataset()
    }

    /// Load a dataset file, choosing the parser by extension
    pub fn load(path: impl AsRef<Path>) -> FinboardResult<Self> {
        let path = path.as_ref();
        let dataset: Dataset = match DataFormat::from_path(path)? {
            DataFormat::Json => read_json_required(path)?,
            DataFormat::Yaml => read_yaml_required(path)?,
            DataFormat::Csv => Self {
                transactions: read_csv_transactions(open_required(path)?)?,
                ..Self::default()
            },
        };
        dataset.validate()?;
        info!(
            "Loaded {} transactions, {} accounts, {} budgets from {}",
            dataset.transactions.len(),
            dataset.accounts.len(),
            dataset.budgets.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Pick the dataset for a command
    ///
    /// An explicit path wins; then the configured default dataset if the
    /// file exists; otherwise the built-in sample.
    pub fn resolve(explicit: Option<&Path>, settings: &Settings) -> FinboardResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match settings.default_dataset.as_deref() {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!(
                    "Default dataset {} not found, using built-in sample data",
                    path.display()
                );
                Ok(Self::sample())
            }
            None => {
                warn!("No dataset given, using built-in sample data");
                Ok(Self::sample())
            }
        }
    }

    /// Check record-level invariants
    ///
    /// Amounts are non-zero, ids and budget categories are unique, and each
    /// record list totals without overflowing, so any grouping of it does too.
    pub fn validate(&self) -> FinboardResult<()> {
        let mut seen = HashSet::with_capacity(self.transactions.len());
        for txn in &self.transactions {
            txn.validate()
                .map_err(|e| FinboardError::Validation(format!("{} ({})", e, txn.id)))?;
            if !seen.insert(txn.id) {
                return Err(FinboardError::Storage(format!(
                    "Duplicate transaction id {}",
                    txn.id
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.accounts.len());
        for account in &self.accounts {
            if !seen.insert(account.id) {
                return Err(FinboardError::Storage(format!(
                    "Duplicate account id {}",
                    account.id
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.budgets.len());
        for budget in &self.budgets {
            if !seen.insert(budget.category) {
                return Err(FinboardError::Storage(format!(
                    "Duplicate budget for {}",
                    budget.category.label()
                )));
            }
        }

        check_magnitude("transaction amounts", self.transactions.iter().map(|t| t.amount))?;
        check_magnitude("account balances", self.accounts.iter().map(|a| a.balance))?;
        check_magnitude(
            "budget amounts",
            self.budgets.iter().flat_map(|b| [b.limit, b.spent()]),
        )?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.transactions.is_empty() && self.budgets.is_empty()
    }
}

/// Fails when the absolute values of `amounts` do not sum within `Money`
fn check_magnitude(what: &str, amounts: impl Iterator<Item = Money>) -> FinboardResult<()> {
    amounts
        .map(|m| m.checked_abs())
        .try_fold(Money::zero(), |acc, m| acc.checked_add(m?))
        .map(|_| ())
        .ok_or_else(|| FinboardError::Validation(format!("{} are too large to total", what)))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    description: String,
    amount: String,
    category: String,
}

/// Parse CSV transaction rows
///
/// Ids are assigned by row position, so the same file always yields the
/// same ids. Errors name the 1-based line number, counting the header.
pub fn read_csv_transactions<R: Read>(reader: R) -> FinboardResult<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (idx, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let line = idx + 2;
        let row = result?;
        let row_error = |field: &str, value: &str| {
            FinboardError::Validation(format!("line {}: invalid {} '{}'", line, field, value))
        };

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|_| row_error("date", &row.date))?;
        let amount = Money::parse(&row.amount).map_err(|_| row_error("amount", &row.amount))?;
        let category: Category = row
            .category
            .parse()
            .map_err(|_| row_error("category", &row.category))?;

        transactions.push(
            Transaction::new(date, row.description, amount, category)
                .with_id(TransactionId::from_seq(idx as u128 + 1)),
        );
    }
    debug!("Parsed {} CSV rows", transactions.len());
    Ok(transactions)
}
