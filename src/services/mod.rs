//! Service layer for the ATM ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, authentication and atomic balance mutations.

pub mod teller;

pub use teller::{AccountRef, OpenedAccount, Teller, TransferResult, MAX_LOGIN_ATTEMPTS};
