//! Core data models for the ATM ledger
//!
//! Customers own ordered accounts; balances are fixed-point `Money`.

pub mod account;
pub mod customer;
pub mod money;

pub use account::{Account, AccountKind};
pub use customer::{validate_customer_number, validate_pin, Customer, PIN_RANGE};
pub use money::{Money, MoneyParseError};
