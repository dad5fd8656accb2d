//! CLI commands for reports

use clap::Subcommand;
use log::info;
use std::path::PathBuf;

use super::{export_to_file, FilterArgs};
use crate::config::Settings;
use crate::error::FinboardResult;
use crate::models::{Budget, BudgetLimit, Granularity};
use crate::reports::{BudgetOverviewReport, CashflowReport, NetWorthReport, SpendingReport};
use crate::services::budget::derive_budgets;
use crate::services::filter::filter;
use crate::storage::Dataset;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category
    Spending {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income vs expenses per month or year
    #[command(alias = "income-expenses")]
    Cashflow {
        /// Group by month or year
        #[arg(long = "by", default_value = "month")]
        granularity: Granularity,

        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget overview with status per category
    #[command(alias = "budget-overview")]
    Budget {
        /// Recompute spending from transactions instead of the tracked values
        #[arg(long)]
        derive: bool,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Account balances and net worth
    #[command(alias = "networth")]
    NetWorth {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    dataset: &Dataset,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinboardResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Spending {
            filter,
            top,
            output,
        } => {
            let criteria = filter.to_criteria(&dataset.accounts)?;
            let mut report =
                SpendingReport::generate(&dataset.transactions, &dataset.budgets, &criteria);
            if let Some(n) = top {
                report.categories.truncate(n);
            }

            if let Some(path) = output {
                export_to_file(&path, |w| report.export_csv(w))?;
                println!("Spending report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Cashflow {
            granularity,
            filter: filter_args,
            output,
        } => {
            let criteria = filter_args.to_criteria(&dataset.accounts)?;
            let matched = filter(&dataset.transactions, &criteria);
            let report = CashflowReport::generate(&matched, granularity);

            if let Some(path) = output {
                export_to_file(&path, |w| report.export_csv(w))?;
                println!("Cash flow report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Budget { derive, output } => {
            let budgets: Vec<Budget> = if derive {
                info!("Recomputing budget spending from transactions");
                let limits: Vec<BudgetLimit> = dataset
                    .budgets
                    .iter()
                    .map(|b| BudgetLimit::new(b.category, b.limit))
                    .collect();
                derive_budgets(&limits, &dataset.transactions)
            } else {
                dataset.budgets.clone()
            };
            let report = BudgetOverviewReport::generate(&budgets, settings.thresholds()?);

            if let Some(path) = output {
                export_to_file(&path, |w| report.export_csv(w))?;
                println!("Budget report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::NetWorth { output } => {
            let report = NetWorthReport::generate(&dataset.accounts);

            if let Some(path) = output {
                export_to_file(&path, |w| report.export_csv(w))?;
                println!("Net worth report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(symbol));
            }
        }
    }

    Ok(())
}
