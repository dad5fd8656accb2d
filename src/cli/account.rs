//! Account CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::format_account_list;
use crate::error::{FinboardError, FinboardResult};
use crate::models::AccountKind;
use crate::services::account::AccountFilter;
use crate::storage::Dataset;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List accounts with balances
    #[command(alias = "ls")]
    List {
        /// Account kind (bank, credit, investment)
        #[arg(short, long)]
        kind: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Handle account commands
pub fn handle_account_command(
    dataset: &Dataset,
    settings: &Settings,
    cmd: AccountCommands,
) -> FinboardResult<()> {
    match cmd {
        AccountCommands::List { kind, search } => {
            let mut filter = AccountFilter::new();
            if let Some(kind) = kind {
                let parsed = AccountKind::parse(&kind).ok_or_else(|| {
                    FinboardError::Validation(format!(
                        "Invalid account kind '{}'. Valid kinds: bank, credit, investment",
                        kind
                    ))
                })?;
                filter = filter.kind(parsed);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let accounts = filter.apply(&dataset.accounts);
            print!(
                "{}",
                format_account_list(&accounts, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
