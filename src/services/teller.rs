//! Teller service
//!
//! Authentication, account opening and the money-moving operations. Every
//! successful mutation is followed by a full save of the ledger and, when an
//! audit logger is attached, one audit entry. Failed operations change
//! nothing and save nothing.
//!
//! A mutation is committed once it is applied in memory. Save and audit
//! failures after that point do not turn it into an error; they are parked
//! for the caller to report.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    validate_customer_number, validate_pin, Account, AccountKind, Customer, Money,
};
use crate::storage::LedgerStore;

/// Login attempts allowed before the session is sent back to the main menu
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Stable address of an account: owner plus zero-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountRef {
    pub customer_number: u32,
    pub index: usize,
}

impl AccountRef {
    pub fn new(customer_number: u32, index: usize) -> Self {
        Self {
            customer_number,
            index,
        }
    }
}

/// Result of opening an account
#[derive(Debug, Clone)]
pub struct OpenedAccount {
    pub account_ref: AccountRef,
    pub account: Account,
    /// Whether the customer record was created by this call
    pub new_customer: bool,
}

/// Balances after a successful transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferResult {
    pub from_balance: Money,
    pub to_balance: Money,
}

/// Coordinates validated mutations over the ledger store
pub struct Teller<'a> {
    store: &'a mut LedgerStore,
    audit: Option<&'a AuditLogger>,
    save_error: Option<LedgerError>,
    audit_error: Option<LedgerError>,
}

impl<'a> Teller<'a> {
    /// Create a teller over a loaded store
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self {
            store,
            audit: None,
            save_error: None,
            audit_error: None,
        }
    }

    /// Attach an audit logger
    pub fn with_audit(mut self, audit: Option<&'a AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Read-only view of the ledger
    pub fn store(&self) -> &LedgerStore {
        &*self.store
    }

    /// The last ledger save failure, if any
    ///
    /// The in-memory change stands; the next successful save writes it out.
    pub fn take_save_error(&mut self) -> Option<LedgerError> {
        self.save_error.take()
    }

    /// The last audit write failure, if any
    ///
    /// Audit failures never undo a committed operation; they are parked here
    /// for the caller to report.
    pub fn take_audit_error(&mut self) -> Option<LedgerError> {
        self.audit_error.take()
    }

    /// Check credentials for a 1-based login attempt
    ///
    /// An attempt number outside `1..=MAX_LOGIN_ATTEMPTS`, or a failed final
    /// attempt, yields `TooManyAttempts`.
    pub fn authenticate(&self, customer_number: i64, pin: i64, attempt: u32) -> LedgerResult<&Customer> {
        if !(1..=MAX_LOGIN_ATTEMPTS).contains(&attempt) {
            return Err(LedgerError::TooManyAttempts {
                max: MAX_LOGIN_ATTEMPTS,
            });
        }

        match self.check_credentials(customer_number, pin) {
            Err(e) if e.is_credential_failure() && attempt >= MAX_LOGIN_ATTEMPTS => {
                Err(LedgerError::TooManyAttempts {
                    max: MAX_LOGIN_ATTEMPTS,
                })
            }
            other => other,
        }
    }

    fn check_credentials(&self, customer_number: i64, pin: i64) -> LedgerResult<&Customer> {
        let customer = u32::try_from(customer_number)
            .ok()
            .and_then(|number| self.store.lookup(number))
            .ok_or_else(|| LedgerError::customer_not_found(customer_number))?;

        match u16::try_from(pin) {
            Ok(pin) if customer.pin_matches(pin) => Ok(customer),
            _ => Err(LedgerError::PinMismatch(customer.number())),
        }
    }

    /// Open a zero-balance account, creating the customer if needed
    ///
    /// An existing customer must present the same PIN; otherwise nothing is
    /// created and the store is untouched.
    pub fn create_account(
        &mut self,
        customer_number: i64,
        pin: i64,
        kind: AccountKind,
    ) -> LedgerResult<OpenedAccount> {
        let number = validate_customer_number(customer_number)?;
        let pin = validate_pin(pin)?;

        let new_customer = match self.store.lookup(number) {
            None => true,
            Some(existing) if existing.pin_matches(pin) => false,
            Some(_) => return Err(LedgerError::PinMismatch(number)),
        };

        if new_customer {
            self.store.upsert_customer(Customer::new(number, pin));
        }

        let customer = self
            .store
            .lookup_mut(number)
            .ok_or_else(|| LedgerError::customer_not_found(number))?;
        let account = Account::new(kind);
        let index = customer.add_account(account.clone());

        let mut entries = Vec::with_capacity(2);
        if new_customer {
            entries.push(AuditEntry::customer_created(number));
        }
        entries.push(AuditEntry::account_opened(number, index, kind));
        self.commit(&entries);

        Ok(OpenedAccount {
            account_ref: AccountRef::new(number, index),
            account,
            new_customer,
        })
    }

    /// Look up an account
    pub fn account(&self, account_ref: AccountRef) -> LedgerResult<&Account> {
        self.store
            .lookup(account_ref.customer_number)
            .ok_or_else(|| LedgerError::customer_not_found(account_ref.customer_number))?
            .account(account_ref.index)
            .ok_or_else(|| {
                LedgerError::account_not_found(account_ref.customer_number, account_ref.index)
            })
    }

    fn account_mut(&mut self, account_ref: AccountRef) -> LedgerResult<&mut Account> {
        self.store
            .lookup_mut(account_ref.customer_number)
            .ok_or_else(|| LedgerError::customer_not_found(account_ref.customer_number))?
            .account_mut(account_ref.index)
            .ok_or_else(|| {
                LedgerError::account_not_found(account_ref.customer_number, account_ref.index)
            })
    }

    /// Deposit into an account, returning the new balance
    pub fn deposit(&mut self, account_ref: AccountRef, amount: Money) -> LedgerResult<Money> {
        let account = self.account_mut(account_ref)?;
        account.deposit(amount)?;
        let balance = account.balance();

        self.commit(&[AuditEntry::deposit(
            account_ref.customer_number,
            account_ref.index,
            amount,
            balance,
        )]);

        Ok(balance)
    }

    /// Withdraw from an account, returning the new balance
    pub fn withdraw(&mut self, account_ref: AccountRef, amount: Money) -> LedgerResult<Money> {
        let account = self.account_mut(account_ref)?;
        account.withdraw(amount)?;
        let balance = account.balance();

        self.commit(&[AuditEntry::withdraw(
            account_ref.customer_number,
            account_ref.index,
            amount,
            balance,
        )]);

        Ok(balance)
    }

    /// Move money between two accounts
    ///
    /// The withdrawal happens first; if the deposit then fails the withdrawal
    /// is reversed, so the combined balance never changes. One save after
    /// both steps succeed.
    pub fn transfer(
        &mut self,
        from: AccountRef,
        to: AccountRef,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        // Both ends must exist before any balance moves
        self.account(to)?;

        self.account_mut(from)?.withdraw(amount)?;

        let to_balance = match self.account_mut(to).and_then(|target| {
            target.deposit(amount)?;
            Ok(target.balance())
        }) {
            Ok(balance) => balance,
            Err(e) => {
                // Cannot overflow: restores the balance held before the withdrawal
                self.account_mut(from)?.deposit(amount)?;
                return Err(e);
            }
        };
        let from_balance = self.account(from)?.balance();

        self.commit(&[AuditEntry::transfer(
            (from.customer_number, from.index, from_balance),
            (to.customer_number, to.index, to_balance),
            amount,
        )]);

        Ok(TransferResult {
            from_balance,
            to_balance,
        })
    }

    /// Persist an applied mutation and log it
    fn commit(&mut self, entries: &[AuditEntry]) {
        if let Err(e) = self.store.save() {
            self.save_error = Some(e);
        }
        if let Some(audit) = self.audit {
            if let Err(e) = audit.log_batch(entries) {
                self.audit_error = Some(e);
            }
        }
    }
}
