//! `atm config`: show and change settings

use crate::config::{LedgerPaths, Settings, DATA_DIR_ENV};
use crate::error::LedgerResult;

/// Apply any requested changes, save them, and describe the configuration
pub fn apply_config(
    paths: &LedgerPaths,
    settings: &mut Settings,
    audit: Option<bool>,
    hide_pin: Option<bool>,
) -> LedgerResult<String> {
    let changed = audit.is_some() || hide_pin.is_some();
    if let Some(enabled) = audit {
        settings.audit_enabled = enabled;
    }
    if let Some(hide) = hide_pin {
        settings.hide_pin_input = hide;
    }
    if changed {
        settings.save(paths)?;
    }

    let mut output = String::new();
    output.push_str("ATM Ledger Configuration\n");
    output.push_str("========================\n");
    output.push_str(&format!("Data directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Ledger file:    {}\n", paths.ledger_file().display()));
    output.push_str(&format!("Audit log:      {}\n", paths.audit_log().display()));
    output.push_str(&format!("Settings file:  {}\n", paths.settings_file().display()));
    output.push_str(&format!("(override with --data-dir or {})\n", DATA_DIR_ENV));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Audit enabled:  {}\n", settings.audit_enabled));
    output.push_str(&format!("  Hide PIN input: {}\n", settings.hide_pin_input));
    if changed {
        output.push_str("\nSettings saved.\n");
    }

    Ok(output)
}

/// Print the configuration, saving any changes first
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    audit: Option<bool>,
    hide_pin: Option<bool>,
) -> LedgerResult<()> {
    print!("{}", apply_config(paths, settings, audit, hide_pin)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let output = apply_config(&paths, &mut settings, None, None).unwrap();
        assert!(output.contains("customers.txt"));
        assert!(output.contains("Audit enabled:  true"));
        assert!(!output.contains("Settings saved."));
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_change_is_saved() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let output = apply_config(&paths, &mut settings, Some(false), None).unwrap();
        assert!(output.contains("Audit enabled:  false"));
        assert!(output.contains("Settings saved."));

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert!(!reloaded.audit_enabled);
        assert!(reloaded.hide_pin_input);
    }
}
