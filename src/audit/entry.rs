//! Audit entry data structures
//!
//! One entry per successful ledger mutation. Account positions are stored
//! zero-based; human-readable output shows them one-based.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AccountKind, Money};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A new customer record was created
    CreateCustomer,
    /// An account was appended to a customer
    OpenAccount,
    Deposit,
    Withdraw,
    Transfer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::CreateCustomer => write!(f, "CREATE_CUSTOMER"),
            Operation::OpenAccount => write!(f, "OPEN_ACCOUNT"),
            Operation::Deposit => write!(f, "DEPOSIT"),
            Operation::Withdraw => write!(f, "WITHDRAW"),
            Operation::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub customer_number: u32,

    /// Account acted on (transfer source for transfers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_index: Option<usize>,

    /// Transfer destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_index: Option<usize>,

    /// Owner of the transfer destination, when it is another customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_customer: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_kind: Option<AccountKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Balance of `account_index` after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<Money>,

    /// Balance of `target_index` after a transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_balance_after: Option<Money>,
}

impl AuditEntry {
    fn base(operation: Operation, customer_number: u32) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            customer_number,
            account_index: None,
            target_index: None,
            target_customer: None,
            account_kind: None,
            amount: None,
            balance_after: None,
            target_balance_after: None,
        }
    }

    pub fn customer_created(customer_number: u32) -> Self {
        Self::base(Operation::CreateCustomer, customer_number)
    }

    pub fn account_opened(customer_number: u32, index: usize, kind: AccountKind) -> Self {
        Self {
            account_index: Some(index),
            account_kind: Some(kind),
            ..Self::base(Operation::OpenAccount, customer_number)
        }
    }

    pub fn deposit(customer_number: u32, index: usize, amount: Money, balance_after: Money) -> Self {
        Self {
            account_index: Some(index),
            amount: Some(amount),
            balance_after: Some(balance_after),
            ..Self::base(Operation::Deposit, customer_number)
        }
    }

    pub fn withdraw(customer_number: u32, index: usize, amount: Money, balance_after: Money) -> Self {
        Self {
            account_index: Some(index),
            amount: Some(amount),
            balance_after: Some(balance_after),
            ..Self::base(Operation::Withdraw, customer_number)
        }
    }

    /// Transfer between `(customer, index, balance after)` pairs
    pub fn transfer(from: (u32, usize, Money), to: (u32, usize, Money), amount: Money) -> Self {
        let customer_number = from.0;
        Self {
            account_index: Some(from.1),
            balance_after: Some(from.2),
            target_index: Some(to.1),
            target_customer: (to.0 != customer_number).then_some(to.0),
            target_balance_after: Some(to.2),
            amount: Some(amount),
            ..Self::base(Operation::Transfer, customer_number)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} customer {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.customer_number
        );

        if let Some(index) = self.account_index {
            output.push_str(&format!(" account {}", index + 1));
        }
        if let Some(kind) = self.account_kind {
            output.push_str(&format!(" ({})", kind));
        }
        if let Some(target) = self.target_index {
            match self.target_customer {
                Some(other) => output.push_str(&format!(" -> customer {} account {}", other, target + 1)),
                None => output.push_str(&format!(" -> account {}", target + 1)),
            }
        }
        if let Some(amount) = self.amount {
            output.push_str(&format!(" amount {}", amount));
        }
        match (self.balance_after, self.target_balance_after) {
            (Some(from), Some(to)) => output.push_str(&format!(" balances {} / {}", from, to)),
            (Some(balance), None) => output.push_str(&format!(" balance {}", balance)),
            _ => {}
        }

        output
    }
}
