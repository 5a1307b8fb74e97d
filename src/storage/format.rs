//! Ledger text format
//!
//! One record per line, colon-delimited:
//!
//! ```text
//! CUSTOMER:<customerNumber>:<pin>
//! ACCOUNT:<CHECKING|SAVINGS>:<balance>
//! ```
//!
//! Each `ACCOUNT` line belongs to the nearest `CUSTOMER` line above it.
//! Serialization is deterministic: customers in ascending number order,
//! accounts in insertion order, balances as plain two-decimal numbers.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{validate_customer_number, validate_pin, Account, AccountKind, Customer, Money};

const CUSTOMER_TAG: &str = "CUSTOMER";
const ACCOUNT_TAG: &str = "ACCOUNT";

/// A parse failure, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub line: usize,
    pub message: String,
}

impl FormatError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for FormatError {}

/// Serialize the whole ledger
pub fn serialize(customers: &BTreeMap<u32, Customer>) -> String {
    let mut out = String::new();
    for customer in customers.values() {
        out.push_str(&format!(
            "{}:{}:{}\n",
            CUSTOMER_TAG,
            customer.number(),
            customer.pin()
        ));
        for account in customer.accounts() {
            out.push_str(&format!(
                "{}:{}:{}\n",
                ACCOUNT_TAG,
                account.kind().as_tag(),
                account.balance().to_plain_string()
            ));
        }
    }
    out
}

/// Parse a whole ledger
///
/// Either every record parses or nothing is returned.
pub fn parse(text: &str) -> Result<BTreeMap<u32, Customer>, FormatError> {
    let mut customers = BTreeMap::new();
    let mut current: Option<Customer> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(':').map(str::trim).collect();
        match fields[0] {
            CUSTOMER_TAG => {
                let [_, number, pin] = fields[..] else {
                    return Err(FormatError::new(line_no, "expected CUSTOMER:<number>:<pin>"));
                };
                let customer = parse_customer(number, pin)
                    .map_err(|message| FormatError::new(line_no, message))?;

                if let Some(done) = current.take() {
                    customers.insert(done.number(), done);
                }
                if customers.contains_key(&customer.number()) {
                    return Err(FormatError::new(
                        line_no,
                        format!("duplicate customer {}", customer.number()),
                    ));
                }
                current = Some(customer);
            }
            ACCOUNT_TAG => {
                let [_, kind, balance] = fields[..] else {
                    return Err(FormatError::new(line_no, "expected ACCOUNT:<kind>:<balance>"));
                };
                let owner = current.as_mut().ok_or_else(|| {
                    FormatError::new(line_no, "account record before any customer record")
                })?;
                let account = parse_account(kind, balance)
                    .map_err(|message| FormatError::new(line_no, message))?;
                owner.add_account(account);
            }
            other => {
                return Err(FormatError::new(line_no, format!("unknown record '{}'", other)));
            }
        }
    }

    if let Some(done) = current.take() {
        customers.insert(done.number(), done);
    }

    Ok(customers)
}

fn parse_customer(number: &str, pin: &str) -> Result<Customer, String> {
    let number: i64 = number
        .parse()
        .map_err(|_| format!("invalid customer number '{}'", number))?;
    let number = validate_customer_number(number).map_err(|e| e.to_string())?;

    let pin_value: i64 = pin.parse().map_err(|_| format!("invalid PIN '{}'", pin))?;
    let pin = validate_pin(pin_value).map_err(|e| e.to_string())?;

    Ok(Customer::new(number, pin))
}

fn parse_account(kind: &str, balance: &str) -> Result<Account, String> {
    let kind = AccountKind::from_tag(kind).ok_or_else(|| format!("unknown account kind '{}'", kind))?;
    let balance = Money::parse(balance).map_err(|e| e.to_string())?;
    if balance.is_negative() {
        return Err(format!("negative balance {}", balance.to_plain_string()));
    }
    Account::with_balance(kind, balance).map_err(|e| e.to_string())
}
