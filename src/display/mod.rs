//! Display formatting for terminal output
//!
//! Account menus for the interactive session and the read-only ledger
//! summary used by the `list` command.

pub mod account;
pub mod customer;

pub use account::{format_account_choices, format_account_menu};
pub use customer::format_customer_list;
