//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_registry;
use crate::error::FinboardResult;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List the category registry
    #[command(alias = "ls")]
    List,
}

/// Handle category commands
pub fn handle_category_command(cmd: CategoryCommands) -> FinboardResult<()> {
    match cmd {
        CategoryCommands::List => print!("{}", format_category_registry()),
    }
    Ok(())
}
