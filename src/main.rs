use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use finboard::cli::{
    handle_account_command, handle_category_command, handle_report_command,
    handle_transaction_command,
};
use finboard::config::{paths::FinboardPaths, settings::Settings};
use finboard::storage::Dataset;

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal finance dashboard in the terminal",
    long_about = "finboard filters and aggregates your transactions: spending by \
                  category, income vs expenses over time, budget usage and net worth. \
                  Without --data it runs against built-in sample data."
)]
struct Cli {
    /// Dataset file (.json, .yaml, .yml or .csv)
    #[arg(long, global = true, env = "FINBOARD_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(finboard::cli::TransactionCommands),

    /// Reports
    #[command(subcommand)]
    Report(finboard::cli::ReportCommands),

    /// Account commands
    #[command(subcommand)]
    Account(finboard::cli::AccountCommands),

    /// Category registry
    #[command(subcommand)]
    Category(finboard::cli::CategoryCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = FinboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let load = || Dataset::resolve(cli.data.as_deref(), &settings);

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&load()?, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&load()?, &settings, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&load()?, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(cmd)?;
        }
        Some(Commands::Config) => {
            println!("finboard Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Nearing limit ratio: {}", settings.nearing_limit_ratio);
            println!("  Register limit:      {}", settings.register_limit);
            match &settings.default_dataset {
                Some(path) => println!("  Default dataset:     {}", path.display()),
                None => println!("  Default dataset:     (built-in sample)"),
            }
        }
        None => {
            println!("finboard - personal finance dashboard");
            println!();
            println!("Run 'finboard --help' for usage information.");
        }
    }

    Ok(())
}
