//! ATM ledger - a console ATM over a flat-file customer ledger
//!
//! Customers are identified by a number and a four-digit PIN and own an
//! ordered list of checking and savings accounts. Deposits, withdrawals and
//! transfers are validated, applied atomically and followed by a full
//! rewrite of the ledger file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Base directory, file paths and settings
//! - `error`: Custom error types
//! - `models`: Money, accounts and customers
//! - `storage`: Ledger file format and the in-memory store
//! - `services`: The teller (authentication and money movement)
//! - `audit`: Append-only operation log
//! - `display`: Console formatting of accounts and customers
//! - `session`: Interactive menu controller
//! - `cli`: Command handlers for the `atm` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use atm_ledger::models::{AccountKind, Money};
//! use atm_ledger::services::Teller;
//! use atm_ledger::storage::LedgerStore;
//!
//! # fn main() -> atm_ledger::LedgerResult<()> {
//! let mut store = LedgerStore::new("customers.txt");
//! let mut teller = Teller::new(&mut store);
//! let opened = teller.create_account(1001, 4321, AccountKind::Checking)?;
//! teller.deposit(opened.account_ref, Money::from_cents(10_000))?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
