//! Configuration module for the ATM ledger
//!
//! - Base directory and file path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{LedgerPaths, DATA_DIR_ENV, LEDGER_FILE_NAME};
pub use settings::Settings;
