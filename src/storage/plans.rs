//! Account type sidecar
//!
//! The fixed-width record has no column for the account type, so types are
//! kept in `account_types.json` keyed by canonical account number.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::models::{Account, AccountNumber, AccountType};

use super::file_io::{read_json, write_json_atomic};

/// Serializable sidecar structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlanData {
    #[serde(default)]
    types: BTreeMap<String, AccountType>,
}

/// Persists `account_type` per account
pub struct PlanRegistry {
    path: PathBuf,
    types: BTreeMap<String, AccountType>,
}

impl PlanRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            types: BTreeMap::new(),
        }
    }

    /// Load types from disk; a missing file means every account is basic
    pub fn load(&mut self) -> Result<(), BankError> {
        let data: PlanData = read_json(&self.path)?;
        self.types = data.types;
        Ok(())
    }

    /// Type recorded for an account, `basic` when none is recorded
    pub fn type_of(&self, number: &AccountNumber) -> AccountType {
        self.types
            .get(number.as_str())
            .copied()
            .unwrap_or_default()
    }

    /// Rewrite the sidecar so it mirrors exactly `accounts`
    pub fn save_for(&mut self, accounts: &[Account]) -> Result<(), BankError> {
        let types: BTreeMap<String, AccountType> = accounts
            .iter()
            .map(|a| (a.number.to_string(), a.account_type))
            .collect();

        write_json_atomic(&self.path, &PlanData { types: types.clone() })?;
        self.types = types;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn account(number: &str, account_type: AccountType) -> Account {
        Account::new(
            AccountNumber::parse(number).unwrap(),
            "Holder",
            account_type,
            Money::zero(),
        )
    }

    #[test]
    fn test_missing_file_defaults_to_basic() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = PlanRegistry::new(temp_dir.path().join("account_types.json"));
        registry.load().unwrap();

        let number = AccountNumber::parse("5").unwrap();
        assert_eq!(registry.type_of(&number), AccountType::Basic);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("account_types.json");

        let mut registry = PlanRegistry::new(path.clone());
        registry
            .save_for(&[
                account("1", AccountType::Admin),
                account("2", AccountType::StudentPlan),
            ])
            .unwrap();

        let mut reloaded = PlanRegistry::new(path);
        reloaded.load().unwrap();
        assert_eq!(
            reloaded.type_of(&AccountNumber::parse("00001").unwrap()),
            AccountType::Admin
        );
        assert_eq!(
            reloaded.type_of(&AccountNumber::parse("2").unwrap()),
            AccountType::StudentPlan
        );
    }

    #[test]
    fn test_save_prunes_removed_accounts() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = PlanRegistry::new(temp_dir.path().join("account_types.json"));

        registry
            .save_for(&[account("3", AccountType::Admin)])
            .unwrap();
        registry.save_for(&[]).unwrap();

        registry.load().unwrap();
        assert_eq!(
            registry.type_of(&AccountNumber::parse("3").unwrap()),
            AccountType::Basic
        );
    }
}
