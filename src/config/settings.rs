//! User settings for simplebank
//!
//! Holds the admin identification policy, the per-session caps and the bill
//! payee allow-list. Stored as `config.json` next to the ledger.

use serde::{Deserialize, Serialize};

use super::paths::BankPaths;
use crate::error::BankError;
use crate::services::policy::{AdminPolicy, EngineConfig, PayeeList, SessionLimits};

/// User settings for simplebank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How privileged accounts are recognized
    #[serde(default)]
    pub admin_policy: AdminPolicy,

    /// Session caps for non-privileged accounts
    #[serde(default)]
    pub limits: SessionLimits,

    /// Companies a bill may be paid to
    #[serde(default)]
    pub payees: PayeeList,

    /// Whether committed transactions are written to the transaction log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            admin_policy: AdminPolicy::default(),
            limits: SessionLimits::default(),
            payees: PayeeList::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BankPaths) -> Result<Self, BankError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BankError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BankError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BankPaths) -> Result<(), BankError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BankError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BankError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Engine configuration derived from these settings
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            policy: self.admin_policy.clone(),
            limits: self.limits.clone(),
            payees: self.payees.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.admin_policy, AdminPolicy::AccountType);
        assert_eq!(settings.limits.withdraw, Money::from_cents(50_000));
        assert_eq!(settings.limits.transfer, Money::from_cents(100_000));
        assert_eq!(settings.limits.bill_payment, Money::from_cents(200_000));
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.admin_policy = AdminPolicy::canonical_admin();
        settings.audit_enabled = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.admin_policy, AdminPolicy::canonical_admin());
        assert!(!loaded.audit_enabled);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"admin_policy": {"kind": "canonical-identity", "number": "1", "name": "Admin"}}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.admin_policy, AdminPolicy::canonical_admin());
        assert_eq!(loaded.limits, SessionLimits::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BankError::Config(_))
        ));
    }
}
