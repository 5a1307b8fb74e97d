//! Audit logging for the ATM ledger
//!
//! Records every successful ledger mutation in an append-only, line-delimited
//! JSON log next to the ledger file. The log is write-only from the ledger's
//! point of view: it is never replayed into balances.
//!
//! - `AuditEntry`: timestamp, operation, customer and account positions,
//!   amount and resulting balances.
//! - `AuditLogger`: appends entries and reads them back for display.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
