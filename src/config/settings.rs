//! User settings for the ATM ledger
//!
//! Stored as `config.json` in the base directory. Missing fields take their
//! defaults so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{read_json_file, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Append every successful mutation to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Read PINs without echo when attached to a terminal
    #[serde(default = "default_true")]
    pub hide_pin_input: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_enabled: true,
            hide_pin_input: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        read_json_file(paths.settings_file())
            .map(Option::unwrap_or_default)
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
