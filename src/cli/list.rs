//! `atm list`: read-only ledger summary

use crate::audit::AuditLogger;
use crate::config::LedgerPaths;
use crate::display::format_customer_list;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerStore;

/// Render the customer summary and, optionally, the last `audit` log entries
pub fn render_list(paths: &LedgerPaths, audit: Option<usize>) -> LedgerResult<String> {
    let mut store = LedgerStore::new(paths.ledger_file());
    let mut output = match store.load() {
        Ok(_) => format_customer_list(store.customers()),
        Err(LedgerError::PersistenceUnavailable(_)) => "No existing data found.\n".to_string(),
        Err(e) => return Err(e),
    };

    if let Some(count) = audit {
        let logger = AuditLogger::new(paths.audit_log());
        output.push_str("\nRecent activity:\n");
        if !logger.exists() {
            output.push_str("  No audit log yet.\n");
            return Ok(output);
        }
        let entries = logger.read_recent(count)?;
        if entries.is_empty() {
            output.push_str("  No audit entries.\n");
        }
        for entry in &entries {
            output.push_str(&format!("  {}\n", entry.format_human_readable()));
        }
    }

    Ok(output)
}

/// Print the ledger summary
pub fn handle_list_command(paths: &LedgerPaths, audit: Option<usize>) -> LedgerResult<()> {
    print!("{}", render_list(paths, audit)?);
    Ok(())
}
