//! Customer model
//!
//! A customer is a numeric identity with a four-digit PIN that owns an
//! ordered list of accounts. Accounts are addressed by their position.

use std::ops::RangeInclusive;

use super::account::Account;
use crate::error::{LedgerError, LedgerResult};

/// Valid PIN values (four digits, no leading zero)
pub const PIN_RANGE: RangeInclusive<i64> = 1000..=9999;

/// Validate a raw customer number
pub fn validate_customer_number(raw: i64) -> LedgerResult<u32> {
    if raw <= 0 {
        return Err(LedgerError::InvalidCustomerNumber);
    }
    u32::try_from(raw).map_err(|_| LedgerError::CustomerNumberTooLarge { max: u32::MAX })
}

/// Validate a raw PIN
pub fn validate_pin(raw: i64) -> LedgerResult<u16> {
    if !PIN_RANGE.contains(&raw) {
        return Err(LedgerError::InvalidPin);
    }
    u16::try_from(raw).map_err(|_| LedgerError::InvalidPin)
}

/// A bank customer with accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    number: u32,
    pin: u16,
    accounts: Vec<Account>,
}

impl Customer {
    /// Create a customer with no accounts
    pub fn new(number: u32, pin: u16) -> Self {
        Self {
            number,
            pin,
            accounts: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn pin(&self) -> u16 {
        self.pin
    }

    /// Exact clear-text PIN comparison
    pub fn pin_matches(&self, pin: u16) -> bool {
        self.pin == pin
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Append an account, returning its zero-based index
    pub fn add_account(&mut self, account: Account) -> usize {
        self.accounts.push(account);
        self.accounts.len() - 1
    }

    pub fn account(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn account_mut(&mut self, index: usize) -> Option<&mut Account> {
        self.accounts.get_mut(index)
    }

    /// Indices of every account except `index`, in display order
    pub fn other_account_indices(&self, index: usize) -> Vec<usize> {
        (0..self.accounts.len()).filter(|&i| i != index).collect()
    }
}
