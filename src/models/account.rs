//! Account model
//!
//! Represents a balance-holding account (checking or savings). The balance is
//! never negative: operations that would violate that are rejected before
//! anything changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Checking account
    #[default]
    Checking,
    /// Savings account
    Savings,
}

impl AccountKind {
    /// Tag written to the ledger file
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Checking => "CHECKING",
            Self::Savings => "SAVINGS",
        }
    }

    /// Parse the ledger-file tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CHECKING" => Some(Self::Checking),
            "SAVINGS" => Some(Self::Savings),
            _ => None,
        }
    }

    /// Kind for a 1-based menu choice
    pub fn from_menu_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::Checking),
            2 => Some(Self::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

/// A balance-holding account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    kind: AccountKind,
    balance: Money,
}

impl Account {
    /// Create a new, empty account
    pub fn new(kind: AccountKind) -> Self {
        Self {
            kind,
            balance: Money::zero(),
        }
    }

    /// Restore an account with a known balance
    ///
    /// Fails with `InvalidAmount` if the balance is negative.
    pub fn with_balance(kind: AccountKind, balance: Money) -> LedgerResult<Self> {
        if balance.is_negative() {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(Self { kind, balance })
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Balance formatted for display, e.g. `$1,234.50`
    pub fn formatted_balance(&self) -> String {
        self.balance.to_string()
    }

    /// Add money to the account
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Remove money from the account
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                needed: amount.to_string(),
                available: self.balance.to_string(),
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.formatted_balance())
    }
}
