//! Custom error types for the ATM ledger
//!
//! Every ledger-engine failure is a value of [`LedgerError`]. Callers decide
//! how to present it; the engine never terminates the process.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("Amount must be positive.")]
    InvalidAmount,

    /// Withdrawal would take the balance below zero
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: String, available: String },

    /// Deposit would exceed the largest representable balance
    #[error("Amount too large: balance would overflow")]
    AmountOverflow,

    /// Entity not found
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// PIN did not match the stored PIN
    #[error("PIN does not match for customer {0}")]
    PinMismatch(u32),

    /// Customer number must be positive
    #[error("Customer number must be positive.")]
    InvalidCustomerNumber,

    /// Customer number is larger than the ledger can store
    #[error("Customer number must be at most {max}.")]
    CustomerNumberTooLarge { max: u32 },

    /// PIN must be four digits
    #[error("PIN must be 4 digits.")]
    InvalidPin,

    /// Login attempts exhausted
    #[error("Too many failed attempts (maximum {max}).")]
    TooManyAttempts { max: u32 },

    /// Transfer source and destination are the same account
    #[error("Cannot transfer to the same account")]
    SameAccount,

    /// No ledger file exists yet
    #[error("No existing data found at {0}")]
    PersistenceUnavailable(String),

    /// Ledger file content could not be parsed
    #[error("Data format error: {0}")]
    PersistenceCorrupt(String),

    /// Ledger file could not be written
    #[error("Error saving data: {0}")]
    PersistenceWriteFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Audit log errors
    #[error("Audit log error: {0}")]
    Audit(String),
}

impl LedgerError {
    /// Create a "not found" error for customers
    pub fn customer_not_found(customer_number: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Customer",
            identifier: customer_number.to_string(),
        }
    }

    /// Create a "not found" error for an account position within a customer
    pub fn account_not_found(customer_number: u32, index: usize) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: format!("{}#{}", customer_number, index + 1),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a failed credential check (unknown customer or wrong PIN)
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PinMismatch(_))
    }

    /// Persistence conditions the process can continue from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PersistenceUnavailable(_)
                | Self::PersistenceCorrupt(_)
                | Self::PersistenceWriteFailed(_)
                | Self::Audit(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
