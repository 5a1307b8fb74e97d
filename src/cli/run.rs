//! `atm run`: the interactive ATM session

use std::io::{self, IsTerminal};

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::services::Teller;
use crate::session::{Prompter, Session};
use crate::storage::LedgerStore;

/// Load the ledger for an interactive session
///
/// A missing or malformed file is not fatal: the session starts from an
/// empty ledger and the returned message says so. Any other failure is
/// returned so an unreadable file is never overwritten.
pub fn load_ledger(store: &mut LedgerStore) -> LedgerResult<String> {
    match store.load() {
        Ok(count) => Ok(format!("Data loaded successfully. Customers: {}", count)),
        Err(e) if e.is_recoverable() => Ok(match e {
            LedgerError::PersistenceUnavailable(_) => {
                "No existing data found. Starting fresh.".to_string()
            }
            LedgerError::PersistenceCorrupt(detail) => {
                format!("Data format error. Starting fresh.\n  ({})", detail)
            }
            other => format!("{}\nStarting fresh.", other),
        }),
        Err(e) => Err(e),
    }
}

/// Run the interactive session on stdin/stdout
pub fn handle_run_command(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<()> {
    let mut store = LedgerStore::new(paths.ledger_file());
    println!("{}", load_ledger(&mut store)?);

    let audit = settings
        .audit_enabled
        .then(|| AuditLogger::new(paths.audit_log()));
    let teller = Teller::new(&mut store).with_audit(audit.as_ref());

    let stdin = io::stdin();
    let hide_pin = settings.hide_pin_input && stdin.is_terminal();
    let prompt = Prompter::new(stdin.lock(), io::stdout()).hide_pin(hide_pin);

    Session::new(teller, prompt).run()
}
