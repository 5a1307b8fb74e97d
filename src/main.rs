use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use atm_ledger::cli::{handle_config_command, handle_list_command, handle_run_command};
use atm_ledger::config::{LedgerPaths, Settings, DATA_DIR_ENV};

#[derive(Parser)]
#[command(
    name = "atm",
    version,
    about = "Console ATM over a flat-file customer ledger",
    long_about = "A console ATM: customers log in with a number and PIN, open \
                  checking and savings accounts, and deposit, withdraw or \
                  transfer money. Every change is saved to a plain-text ledger."
)]
struct Cli {
    /// Directory holding the ledger, settings and audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive ATM session (default)
    Run,

    /// Show customers, account counts and total balances
    #[command(alias = "ls")]
    List {
        /// Also show the last N audit log entries
        #[arg(short, long, value_name = "N")]
        audit: Option<usize>,
    },

    /// Show current configuration and paths
    Config {
        /// Turn the audit log on or off
        #[arg(long, value_name = "BOOL")]
        audit: Option<bool>,
        /// Read PINs without echo on a terminal
        #[arg(long, value_name = "BOOL")]
        hide_pin: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => handle_run_command(&paths, &settings)?,
        Commands::List { audit } => handle_list_command(&paths, audit)?,
        Commands::Config { audit, hide_pin } => {
            handle_config_command(&paths, &mut settings, audit, hide_pin)?
        }
    }

    Ok(())
}
