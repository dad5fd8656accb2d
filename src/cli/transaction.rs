//! Transaction CLI commands

use clap::Subcommand;

use super::FilterArgs;
use crate::config::Settings;
use crate::display::transaction::{format_transaction_register, RegisterStyle};
use crate::error::{FinboardError, FinboardResult};
use crate::models::TransactionDraft;
use crate::services::filter::filter_refs;
use crate::storage::Dataset;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// List transactions matching the filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum rows to show (defaults to the configured register limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Validate a new transaction and print it as JSON
    ///
    /// The dataset is not modified.
    New {
        /// Account name or ID
        #[arg(long)]
        account: Option<String>,

        /// Amount (e.g. "-50.00" for outflow, "100.00" for inflow)
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        amount: String,

        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Category key or label
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Mark as recurring
        #[arg(long)]
        recurring: bool,
    },
}

/// Handle transaction commands
pub fn handle_transaction_command(
    dataset: &Dataset,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinboardResult<()> {
    match cmd {
        TransactionCommands::List { filter, limit } => {
            let criteria = filter.to_criteria(&dataset.accounts)?;
            let matched = filter_refs(&dataset.transactions, &criteria);
            let limit = limit.unwrap_or(settings.register_limit);
            let shown: Vec<_> = matched.iter().take(limit).copied().collect();

            let style = RegisterStyle {
                date_format: &settings.date_format,
                currency_symbol: &settings.currency_symbol,
            };
            print!(
                "{}",
                format_transaction_register(&shown, matched.len(), &style)
            );
        }

        TransactionCommands::New {
            account,
            amount,
            date,
            description,
            category,
            recurring,
        } => {
            let draft = TransactionDraft {
                account,
                amount,
                date,
                description,
                category,
                is_recurring: recurring,
            };

            let errors = draft.validate();
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("  {}", error);
                }
                return Err(FinboardError::Validation(format!(
                    "{} field(s) failed validation",
                    errors.len()
                )));
            }

            let txn = draft.build(&dataset.accounts)?;
            println!("{}", serde_json::to_string_pretty(&txn)?);
        }
    }

    Ok(())
}
