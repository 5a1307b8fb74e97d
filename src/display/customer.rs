//! Customer display formatting
//!
//! Read-only ledger summary for the `list` command. PINs are never shown.

use crate::models::{Customer, Money};

/// Format all customers as a table with account counts and totals
pub fn format_customer_list<'a, I>(customers: I) -> String
where
    I: IntoIterator<Item = &'a Customer>,
{
    let rows: Vec<(u32, usize, Money)> = customers
        .into_iter()
        .map(|c| {
            let total: Money = c.accounts().iter().map(|a| a.balance()).sum();
            (c.number(), c.accounts().len(), total)
        })
        .collect();

    if rows.is_empty() {
        return "No customers found.\n".to_string();
    }

    let total_width = rows
        .iter()
        .map(|(_, _, total)| total.to_string().len())
        .max()
        .unwrap_or(0)
        .max(13);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:>8}  {:>total_width$}\n",
        "Customer",
        "Accounts",
        "Total Balance",
        total_width = total_width,
    ));
    output.push_str(&format!(
        "{:-<10}  {:->8}  {:->total_width$}\n",
        "",
        "",
        "",
        total_width = total_width,
    ));

    for (number, count, total) in &rows {
        output.push_str(&format!(
            "{:<10}  {:>8}  {:>total_width$}\n",
            number,
            count,
            total.to_string(),
            total_width = total_width,
        ));
    }

    let accounts: usize = rows.iter().map(|(_, count, _)| count).sum();
    let grand_total: Money = rows.iter().map(|(_, _, total)| *total).sum();
    output.push_str(&format!(
        "{:-<10}  {:->8}  {:->total_width$}\n",
        "",
        "",
        "",
        total_width = total_width,
    ));
    output.push_str(&format!(
        "{:<10}  {:>8}  {:>total_width$}\n",
        "TOTAL",
        accounts,
        grand_total.to_string(),
        total_width = total_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountKind};

    fn customers() -> Vec<Customer> {
        let mut first = Customer::new(1001, 4321);
        first.add_account(
            Account::with_balance(AccountKind::Checking, Money::from_cents(6000)).unwrap(),
        );
        first.add_account(
            Account::with_balance(AccountKind::Savings, Money::from_cents(4000)).unwrap(),
        );
        vec![first, Customer::new(7, 1234)]
    }

    #[test]
    fn test_format_customer_list() {
        let output = format_customer_list(&customers());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Customer"));
        assert!(lines[2].starts_with("1001"));
        assert!(lines[2].ends_with("$100.00"));
        assert!(lines[3].ends_with("$0.00"));
        assert!(lines[5].starts_with("TOTAL"));
        assert!(lines[5].ends_with("$100.00"));
        assert!(!output.contains("4321"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_customer_list(&Vec::<Customer>::new()), "No customers found.\n");
    }
}
