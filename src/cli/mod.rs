//! CLI command handlers
//!
//! Bridges the clap argument parsing in `main` with the ledger, the audit
//! log and the interactive session.

pub mod config;
pub mod list;
pub mod run;

pub use config::handle_config_command;
pub use list::handle_list_command;
pub use run::{handle_run_command, load_ledger};
