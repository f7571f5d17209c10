//! Path management for simplebank
//!
//! Every file location is derived from one base directory that callers pass
//! around explicitly; nothing in the core reads a global path.
//!
//! ## Path Resolution Order
//!
//! 1. `SIMPLEBANK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/simplebank` or `~/.config/simplebank`
//! 3. Windows: `%APPDATA%\simplebank`

use std::path::PathBuf;

use crate::error::BankError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SIMPLEBANK_DATA_DIR";

/// Manages all paths used by simplebank
#[derive(Debug, Clone)]
pub struct BankPaths {
    base_dir: PathBuf,
}

impl BankPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BankError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BankPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// The fixed-width accounts file
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("currentaccounts.txt")
    }

    /// Sidecar holding each account's type
    pub fn account_types_file(&self) -> PathBuf {
        self.base_dir.join("account_types.json")
    }

    /// Append-only transaction log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("transaction_log.txt")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BankError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BankError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a ledger has been initialized here
    pub fn is_initialized(&self) -> bool {
        self.ledger_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BankError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                BankError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("simplebank"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BankError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BankError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("simplebank"))
}
