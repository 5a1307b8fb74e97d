//! Account display formatting
//!
//! Numbered account menus as shown at the ATM prompt.

use crate::models::Customer;

/// Numbered menu of the given account positions, e.g. `1 - Checking ($100.00)`
///
/// Menu numbers are 1-based and follow the order of `indices`, not the
/// accounts' own positions.
pub fn format_account_choices(customer: &Customer, indices: &[usize]) -> String {
    let mut output = String::new();
    for (choice, account) in indices
        .iter()
        .filter_map(|&i| customer.account(i))
        .enumerate()
    {
        output.push_str(&format!("{} - {}\n", choice + 1, account));
    }
    output
}

/// All of a customer's accounts as a numbered menu
pub fn format_account_menu(customer: &Customer) -> String {
    if customer.accounts().is_empty() {
        return "No accounts found.\n".to_string();
    }
    let indices: Vec<usize> = (0..customer.accounts().len()).collect();
    format_account_choices(customer, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountKind, Money};

    fn customer() -> Customer {
        let mut customer = Customer::new(1001, 4321);
        customer.add_account(
            Account::with_balance(AccountKind::Checking, Money::from_cents(10000)).unwrap(),
        );
        customer.add_account(Account::new(AccountKind::Savings));
        customer.add_account(
            Account::with_balance(AccountKind::Savings, Money::from_cents(123450)).unwrap(),
        );
        customer
    }

    #[test]
    fn test_format_account_menu() {
        assert_eq!(
            format_account_menu(&customer()),
            "1 - Checking ($100.00)\n2 - Savings ($0.00)\n3 - Savings ($1,234.50)\n"
        );
    }

    #[test]
    fn test_format_account_menu_empty() {
        assert_eq!(
            format_account_menu(&Customer::new(1, 1234)),
            "No accounts found.\n"
        );
    }

    #[test]
    fn test_choices_are_renumbered() {
        let customer = customer();
        let others = customer.other_account_indices(0);
        assert_eq!(
            format_account_choices(&customer, &others),
            "1 - Savings ($0.00)\n2 - Savings ($1,234.50)\n"
        );
    }
}
