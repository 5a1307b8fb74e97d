//! Interactive ATM session
//!
//! Drives the menus as a small state machine over a [`Teller`]. Every
//! engine error is turned into a message here and the user is re-prompted;
//! only console I/O failures end the session with an error. A failed save
//! after a committed operation is shown as a warning next to its result.

use std::io::{BufRead, Write};

use super::prompt::Prompter;
use crate::display::{format_account_choices, format_account_menu};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{validate_customer_number, validate_pin, AccountKind};
use crate::services::{AccountRef, Teller, MAX_LOGIN_ATTEMPTS};

const BANNER: &str = "\
====================================
         WELCOME TO THE ATM
====================================
";

const MAIN_MENU: &str = "\n=== ATM Main Menu ===\n1 - Login\n2 - Create Account\n3 - Exit\n";

const ACCOUNT_MENU: &str = "\n=== Account Menu ===\n\
1 - View Balance\n\
2 - Deposit\n\
3 - Withdraw\n\
4 - Transfer\n\
5 - Back to Main Menu\n";

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Main menu
    Idle,
    /// Collecting credentials
    Authenticating,
    /// Logged in, choosing one of the customer's accounts
    AccountSelected(u32),
    /// Operating on one account
    AccountMenu(AccountRef),
    /// Login attempts exhausted
    LockedOut,
    /// Exit chosen or input ended
    Finished,
}

/// Menu controller bound to a teller and a console
pub struct Session<'a, R, W> {
    teller: Teller<'a>,
    prompt: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(teller: Teller<'a>, prompt: Prompter<R, W>) -> Self {
        Self { teller, prompt }
    }

    /// Print the banner and run until the user exits or input ends
    pub fn run(&mut self) -> LedgerResult<()> {
        self.prompt.write_block(BANNER)?;

        let mut state = SessionState::Idle;
        while state != SessionState::Finished {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Handle one state and return the next
    pub fn step(&mut self, state: SessionState) -> LedgerResult<SessionState> {
        match state {
            SessionState::Idle => self.main_menu(),
            SessionState::Authenticating => self.login(),
            SessionState::AccountSelected(customer_number) => self.select_account(customer_number),
            SessionState::AccountMenu(account_ref) => self.account_menu(account_ref),
            SessionState::LockedOut => {
                self.prompt
                    .say("Too many failed attempts. Returning to main menu.")?;
                Ok(SessionState::Idle)
            }
            SessionState::Finished => Ok(SessionState::Finished),
        }
    }

    /// Give back the console, mainly for inspecting output
    pub fn into_prompt(self) -> Prompter<R, W> {
        self.prompt
    }

    fn main_menu(&mut self) -> LedgerResult<SessionState> {
        self.prompt.write_block(MAIN_MENU)?;

        let next = match self.prompt.read_number("\nChoice: ")? {
            Some(1) => SessionState::Authenticating,
            Some(2) => {
                self.create_account()?;
                SessionState::Idle
            }
            Some(3) | None => {
                self.prompt.say("Thank you for using our ATM!")?;
                SessionState::Finished
            }
            Some(_) => {
                self.prompt.say("Invalid choice.")?;
                SessionState::Idle
            }
        };
        Ok(next)
    }

    fn login(&mut self) -> LedgerResult<SessionState> {
        for attempt in 1..=MAX_LOGIN_ATTEMPTS {
            let Some(customer_number) = self.prompt.read_number("Enter customer number: ")? else {
                return Ok(SessionState::Finished);
            };
            let Some(pin) = self.prompt.read_pin("Enter PIN: ")? else {
                return Ok(SessionState::Finished);
            };

            match self.teller.authenticate(customer_number, pin, attempt) {
                Ok(customer) => {
                    let number = customer.number();
                    self.prompt.say("Login successful!")?;
                    return Ok(SessionState::AccountSelected(number));
                }
                Err(LedgerError::TooManyAttempts { .. }) => return Ok(SessionState::LockedOut),
                Err(e) if e.is_credential_failure() => {
                    self.prompt.say(format!(
                        "Invalid credentials. {} attempts remaining.",
                        MAX_LOGIN_ATTEMPTS - attempt
                    ))?;
                }
                Err(e) => {
                    self.prompt.say(format!("Error: {}", e))?;
                    return Ok(SessionState::Idle);
                }
            }
        }
        Ok(SessionState::LockedOut)
    }

    fn create_account(&mut self) -> LedgerResult<()> {
        let Some(raw_number) = self.prompt.read_number("Enter customer number: ")? else {
            return Ok(());
        };
        let customer_number = match validate_customer_number(raw_number) {
            Ok(number) => number,
            Err(e) => return self.prompt.say(e),
        };

        let Some(raw_pin) = self.prompt.read_pin("Enter PIN (4 digits): ")? else {
            return Ok(());
        };
        let pin = match validate_pin(raw_pin) {
            Ok(pin) => pin,
            Err(e) => return self.prompt.say(e),
        };

        match self.teller.store().lookup(customer_number) {
            Some(existing) if existing.pin_matches(pin) => {
                self.prompt.say("Welcome back, existing customer!")?;
            }
            Some(_) => return self.prompt.say("Customer exists with different PIN."),
            None => {}
        }

        self.prompt
            .write_block("1 - Checking Account\n2 - Savings Account\n")?;
        let Some(choice) = self.prompt.read_number("Choose account type: ")? else {
            return Ok(());
        };
        let Some(kind) = AccountKind::from_menu_choice(choice) else {
            return self.prompt.say("Invalid account type.");
        };

        match self.teller.create_account(raw_number, raw_pin, kind) {
            Ok(_) => self.prompt.say("Account created successfully!")?,
            Err(e) => self.prompt.say(format!("Error: {}", e))?,
        }
        self.report_warnings()
    }

    fn select_account(&mut self, customer_number: u32) -> LedgerResult<SessionState> {
        let Some(customer) = self.teller.store().lookup(customer_number) else {
            self.prompt
                .say(LedgerError::customer_not_found(customer_number))?;
            return Ok(SessionState::Idle);
        };
        if customer.accounts().is_empty() {
            self.prompt.say("No accounts found.")?;
            return Ok(SessionState::Idle);
        }

        let count = customer.accounts().len();
        let menu = format_account_menu(customer);
        self.prompt.say("\nSelect account:")?;
        self.prompt.write_block(&menu)?;

        let next = match self.prompt.read_number("Choice: ")? {
            None => SessionState::Finished,
            Some(choice) => match menu_index(choice, count) {
                Some(index) => SessionState::AccountMenu(AccountRef::new(customer_number, index)),
                None => {
                    self.prompt.say("Invalid choice.")?;
                    SessionState::Idle
                }
            },
        };
        Ok(next)
    }

    fn account_menu(&mut self, account_ref: AccountRef) -> LedgerResult<SessionState> {
        self.prompt.write_block(ACCOUNT_MENU)?;

        match self.prompt.read_number("Choice: ")? {
            None => return Ok(SessionState::Finished),
            Some(1) => match self.teller.account(account_ref) {
                Ok(account) => {
                    let balance = account.formatted_balance();
                    self.prompt.say(format!("Balance: {}", balance))?;
                }
                Err(e) => self.prompt.say(format!("Error: {}", e))?,
            },
            Some(2) => {
                let Some(amount) = self.prompt.read_amount("Deposit amount: ")? else {
                    return Ok(SessionState::Finished);
                };
                match self.teller.deposit(account_ref, amount) {
                    Ok(balance) => self.prompt.say(format!("New balance: {}", balance))?,
                    Err(e) => self.prompt.say(format!("Error: {}", e))?,
                }
                self.report_warnings()?;
            }
            Some(3) => {
                let Some(amount) = self.prompt.read_amount("Withdraw amount: ")? else {
                    return Ok(SessionState::Finished);
                };
                match self.teller.withdraw(account_ref, amount) {
                    Ok(balance) => self.prompt.say(format!("New balance: {}", balance))?,
                    Err(e) => self.prompt.say(format!("Error: {}", e))?,
                }
                self.report_warnings()?;
            }
            Some(4) => {
                if !self.transfer(account_ref)? {
                    return Ok(SessionState::Finished);
                }
            }
            Some(5) => return Ok(SessionState::Idle),
            Some(_) => self.prompt.say("Invalid choice.")?,
        }

        Ok(SessionState::AccountMenu(account_ref))
    }

    /// Returns `false` when input ended
    fn transfer(&mut self, from: AccountRef) -> LedgerResult<bool> {
        let Some(customer) = self.teller.store().lookup(from.customer_number) else {
            self.prompt
                .say(LedgerError::customer_not_found(from.customer_number))?;
            return Ok(true);
        };

        let others = customer.other_account_indices(from.index);
        if others.is_empty() {
            self.prompt.say("No other accounts for transfer.")?;
            return Ok(true);
        }
        let choices = format_account_choices(customer, &others);

        self.prompt.say("Select target account:")?;
        self.prompt.write_block(&choices)?;
        let Some(choice) = self.prompt.read_number("Choice: ")? else {
            return Ok(false);
        };
        let Some(target) = menu_index(choice, others.len()).map(|i| others[i]) else {
            self.prompt.say("Invalid choice.")?;
            return Ok(true);
        };

        let Some(amount) = self.prompt.read_amount("Transfer amount: ")? else {
            return Ok(false);
        };

        let to = AccountRef::new(from.customer_number, target);
        match self.teller.transfer(from, to, amount) {
            Ok(_) => self.prompt.say("Transfer successful!")?,
            Err(e) => self.prompt.say(format!("Transfer failed: {}", e))?,
        }
        self.report_warnings()?;
        Ok(true)
    }

    /// Report save and audit failures from the last committed operation
    fn report_warnings(&mut self) -> LedgerResult<()> {
        let parked = [self.teller.take_save_error(), self.teller.take_audit_error()];
        for e in parked.into_iter().flatten() {
            self.prompt.say(format!("Warning: {}", e))?;
        }
        Ok(())
    }
}

/// Zero-based index for a 1-based menu choice, if in range
fn menu_index(choice: i64, len: usize) -> Option<usize> {
    usize::try_from(choice)
        .ok()
        .and_then(|c| c.checked_sub(1))
        .filter(|&i| i < len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::models::Money;
    use crate::storage::LedgerStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("customers.txt"));
        (temp_dir, store)
    }

    /// Run a whole session over `input`, returning everything written
    fn run_script(store: &mut LedgerStore, audit: Option<&AuditLogger>, input: &str) -> String {
        let prompt = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let teller = Teller::new(store).with_audit(audit);
        let mut session = Session::new(teller, prompt);
        session.run().unwrap();
        String::from_utf8(session.into_prompt().into_inner().1).unwrap()
    }

    fn balance(store: &LedgerStore, customer: u32, index: usize) -> Money {
        store
            .lookup(customer)
            .unwrap()
            .account(index)
            .unwrap()
            .balance()
    }

    #[test]
    fn test_menu_index() {
        assert_eq!(menu_index(1, 2), Some(0));
        assert_eq!(menu_index(2, 2), Some(1));
        assert_eq!(menu_index(3, 2), None);
        assert_eq!(menu_index(0, 2), None);
        assert_eq!(menu_index(-1, 2), None);
    }

    #[test]
    fn test_exit_and_eof() {
        let (_temp_dir, mut store) = setup();
        let out = run_script(&mut store, None, "3\n");
        assert!(out.contains("WELCOME TO THE ATM"));
        assert!(out.contains("Thank you for using our ATM!"));

        let out = run_script(&mut store, None, "");
        assert!(out.contains("Thank you for using our ATM!"));
    }

    #[test]
    fn test_invalid_main_choice() {
        let (_temp_dir, mut store) = setup();
        let out = run_script(&mut store, None, "9\nx\n3\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Invalid input. Please enter a valid number."));
    }

    #[test]
    fn test_create_deposit_withdraw() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n\
                      1\n1001\n4321\n1\n\
                      2\n100.00\n\
                      3\n150.00\n\
                      1\n5\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Account created successfully!"));
        assert!(out.contains("Login successful!"));
        assert!(out.contains("1 - Checking ($0.00)"));
        assert!(out.contains("New balance: $100.00"));
        assert!(out.contains("Error: Insufficient funds"));
        assert!(out.contains("Balance: $100.00"));
        assert_eq!(balance(&store, 1001, 0), Money::from_cents(10000));
    }

    #[test]
    fn test_create_account_validation_messages() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n0\n\
                      2\n1001\n99\n\
                      2\n1001\n4321\n7\n\
                      2\n1001\n4321\n1\n\
                      2\n1001\n1111\n\
                      2\n1001\n4321\n2\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Customer number must be positive."));
        assert!(out.contains("PIN must be 4 digits."));
        assert!(out.contains("Invalid account type."));
        assert!(out.contains("Customer exists with different PIN."));
        assert!(out.contains("Welcome back, existing customer!"));

        let customer = store.lookup(1001).unwrap();
        assert_eq!(customer.pin(), 4321);
        assert_eq!(customer.accounts().len(), 2);
        assert_eq!(customer.account(1).unwrap().kind(), AccountKind::Savings);
    }

    #[test]
    fn test_lockout_after_three_failures() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n\
                      1\n1001\n1111\n9999\n4321\n1001\n2222\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Invalid credentials. 2 attempts remaining."));
        assert!(out.contains("Invalid credentials. 1 attempts remaining."));
        assert!(out.contains("Too many failed attempts. Returning to main menu."));
        assert!(!out.contains("Login successful!"));
    }

    #[test]
    fn test_login_succeeds_on_third_attempt() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n\
                      1\n1001\n1\n1001\n2\n1001\n4321\n1\n5\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Login successful!"));
        assert!(!out.contains("Too many failed attempts."));
    }

    #[test]
    fn test_login_without_accounts() {
        let (_temp_dir, mut store) = setup();
        store.upsert_customer(crate::models::Customer::new(5, 1234));
        let out = run_script(&mut store, None, "1\n5\n1234\n3\n");
        assert!(out.contains("No accounts found."));
    }

    #[test]
    fn test_transfer_scenario() {
        let (temp_dir, mut store) = setup();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let script = "2\n1001\n4321\n1\n\
                      2\n1001\n4321\n2\n\
                      1\n1001\n4321\n1\n\
                      2\n100\n\
                      4\n1\n40.00\n\
                      5\n3\n";
        let out = run_script(&mut store, Some(&logger), script);

        assert!(out.contains("Select target account:\n1 - Savings ($0.00)"));
        assert!(out.contains("Transfer successful!"));
        assert_eq!(balance(&store, 1001, 0), Money::from_cents(6000));
        assert_eq!(balance(&store, 1001, 1), Money::from_cents(4000));

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.last().unwrap().operation, Operation::Transfer);
    }

    #[test]
    fn test_transfer_failures_leave_balances() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n\
                      2\n1001\n4321\n2\n\
                      1\n1001\n4321\n1\n\
                      2\n10\n\
                      4\n1\n25\n\
                      4\n1\n0\n\
                      4\n3\n\
                      5\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Transfer failed: Insufficient funds"));
        assert!(out.contains("Transfer failed: Amount must be positive."));
        assert!(out.contains("Invalid choice."));
        assert_eq!(balance(&store, 1001, 0), Money::from_cents(1000));
        assert_eq!(balance(&store, 1001, 1), Money::zero());
    }

    #[test]
    fn test_transfer_with_single_account() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n1\n1001\n4321\n1\n4\n5\n3\n";
        let out = run_script(&mut store, None, script);
        assert!(out.contains("No other accounts for transfer."));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let (_temp_dir, mut store) = setup();
        let script = "2\n1001\n4321\n1\n1\n1001\n4321\n1\n2\n-5\n2\n0\n5\n3\n";
        let out = run_script(&mut store, None, script);
        assert_eq!(out.matches("Error: Amount must be positive.").count(), 2);
        assert_eq!(balance(&store, 1001, 0), Money::zero());
    }

    #[test]
    fn test_audit_failure_is_warning() {
        let (temp_dir, mut store) = setup();
        // A directory where the log file should be makes every append fail
        let log_path = temp_dir.path().join("audit.log");
        std::fs::create_dir(&log_path).unwrap();
        let logger = AuditLogger::new(log_path);

        let out = run_script(&mut store, Some(&logger), "2\n1001\n4321\n1\n3\n");
        assert!(out.contains("Account created successfully!"));
        assert!(out.contains("Warning: Audit log error"));
        assert_eq!(store.lookup(1001).unwrap().accounts().len(), 1);
    }

    #[test]
    fn test_save_failure_is_warning_not_failure() {
        let (temp_dir, mut store) = setup();
        let mut customer = crate::models::Customer::new(1001, 4321);
        customer.add_account(
            crate::models::Account::with_balance(AccountKind::Checking, Money::from_cents(10000))
                .unwrap(),
        );
        customer.add_account(crate::models::Account::new(AccountKind::Savings));
        store.upsert_customer(customer);
        std::fs::create_dir_all(temp_dir.path().join("customers.txt").join("blocker")).unwrap();

        let script = "1\n1001\n4321\n1\n\
                      4\n1\n40\n\
                      2\n5\n\
                      5\n3\n";
        let out = run_script(&mut store, None, script);

        assert!(out.contains("Transfer successful!"));
        assert!(!out.contains("Transfer failed"));
        assert!(out.contains("New balance: $65.00"));
        assert_eq!(out.matches("Warning: Error saving data").count(), 2);
        assert_eq!(balance(&store, 1001, 0), Money::from_cents(6500));
        assert_eq!(balance(&store, 1001, 1), Money::from_cents(4000));
    }

    #[test]
    fn test_customer_number_too_large() {
        let (_temp_dir, mut store) = setup();
        let out = run_script(&mut store, None, "2\n4294967296\n3\n");
        assert!(out.contains("Customer number must be at most 4294967295."));
        assert!(!out.contains("must be positive"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_state_transitions() {
        let (_temp_dir, mut store) = setup();
        let prompt = Prompter::new(Cursor::new(b"5\n".to_vec()), Vec::new());
        let mut session = Session::new(Teller::new(&mut store), prompt);

        assert_eq!(
            session.step(SessionState::LockedOut).unwrap(),
            SessionState::Idle
        );
        let account_ref = AccountRef::new(1, 0);
        assert_eq!(
            session.step(SessionState::AccountMenu(account_ref)).unwrap(),
            SessionState::Idle
        );
        assert_eq!(
            session.step(SessionState::Idle).unwrap(),
            SessionState::Finished
        );
    }
}
