//! Account ledger backed by the fixed-width accounts file
//!
//! The ledger owns every account record for one load/mutate/persist cycle.
//! Each mutating call reloads the backing file, applies the change to a
//! working copy, validates every record through the codec and rewrites the
//! whole file. A failure at any step leaves the file untouched.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber};

use super::codec::RecordCodec;
use super::file_io::{read_lines, write_lines_atomic};
use super::plans::PlanRegistry;

/// One ledger line that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number in the ledger file
    pub line_number: usize,
    pub error: BankError,
}

/// Outcome of loading the ledger file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records decoded and kept
    pub loaded: usize,
    /// Lines skipped, in file order
    pub skipped: Vec<LineDiagnostic>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Working copy handed to [`Ledger::transact`]
///
/// Keeps account numbers unique; nothing here touches the disk.
#[derive(Debug, Clone)]
pub struct Draft {
    accounts: Vec<Account>,
}

impl Draft {
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.number == number)
    }

    /// Like `find`, failing with `AccountNotFound`
    pub fn get(&self, number: &AccountNumber) -> BankResult<&Account> {
        self.find(number)
            .ok_or_else(|| BankError::account_not_found(number.to_string()))
    }

    pub fn insert(&mut self, account: Account) -> BankResult<()> {
        if self.find(&account.number).is_some() {
            return Err(BankError::DuplicateAccount(account.number.to_string()));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Swap in a new version of an existing record, returning the old one
    pub fn replace(&mut self, account: Account) -> BankResult<Account> {
        let slot = self
            .accounts
            .iter_mut()
            .find(|a| a.number == account.number)
            .ok_or_else(|| BankError::account_not_found(account.number.to_string()))?;

        Ok(std::mem::replace(slot, account))
    }

    pub fn remove(&mut self, number: &AccountNumber) -> BankResult<Account> {
        let index = self
            .accounts
            .iter()
            .position(|a| &a.number == number)
            .ok_or_else(|| BankError::account_not_found(number.to_string()))?;

        Ok(self.accounts.remove(index))
    }
}

/// Ordered collection of account records persisted as fixed-width lines
pub struct Ledger {
    path: PathBuf,
    plans: PlanRegistry,
    accounts: Vec<Account>,
}

impl Ledger {
    /// Create an empty ledger bound to its backing files (nothing is read)
    pub fn new(path: PathBuf, plans_path: PathBuf) -> Self {
        Self {
            path,
            plans: PlanRegistry::new(plans_path),
            accounts: Vec::new(),
        }
    }

    /// Create a ledger and load it
    pub fn open(path: PathBuf, plans_path: PathBuf) -> BankResult<Self> {
        let mut ledger = Self::new(path, plans_path);
        ledger.load()?;
        Ok(ledger)
    }

    /// Read the backing file, replacing the in-memory records
    ///
    /// Lines that fail to decode, and later lines repeating an account
    /// number, are skipped with a warning and listed in the report. Only a
    /// failure to read the files themselves is returned as an error.
    pub fn load(&mut self) -> BankResult<LoadReport> {
        self.plans.load()?;
        let lines = read_lines(&self.path)?;

        let mut report = LoadReport::default();
        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let decoded = RecordCodec::decode(line).and_then(|account| {
                if seen.contains(&account.number) {
                    Err(BankError::DuplicateAccount(account.number.to_string()))
                } else {
                    Ok(account)
                }
            });

            match decoded {
                Ok(mut account) => {
                    account.account_type = self.plans.type_of(&account.number);
                    seen.insert(account.number.clone());
                    accounts.push(account);
                }
                Err(error) => {
                    log::warn!(
                        "Skipping line {} of {}: {}",
                        index + 1,
                        self.path.display(),
                        error
                    );
                    report.skipped.push(LineDiagnostic {
                        line_number: index + 1,
                        error,
                    });
                }
            }
        }

        report.loaded = accounts.len();
        self.accounts = accounts;
        log::debug!(
            "Loaded {} accounts from {} ({} skipped)",
            report.loaded,
            self.path.display(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// All records in file order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up a record by canonical number
    pub fn find(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.number == number)
    }

    /// Add a new record; fails with `DuplicateAccount` if the number exists
    pub fn insert(&mut self, account: Account) -> BankResult<()> {
        self.transact(|draft| draft.insert(account))
    }

    /// Replace a record with the one `mutator` derives from it
    pub fn update<F>(&mut self, number: &AccountNumber, mutator: F) -> BankResult<Account>
    where
        F: FnOnce(&Account) -> BankResult<Account>,
    {
        self.transact(|draft| {
            let next = mutator(draft.get(number)?)?;
            if &next.number != number {
                return Err(BankError::InvalidAccountNumber(next.number.to_string()));
            }
            draft.replace(next.clone())?;
            Ok(next)
        })
    }

    /// Remove a record, returning it
    pub fn remove(&mut self, number: &AccountNumber) -> BankResult<Account> {
        self.transact(|draft| draft.remove(number))
    }

    /// Run a multi-record change as one load, mutate, persist unit
    ///
    /// `change` works on a copy of freshly loaded records. The copy is only
    /// written (and adopted in memory) when `change` succeeds and every
    /// record encodes.
    pub fn transact<T, F>(&mut self, change: F) -> BankResult<T>
    where
        F: FnOnce(&mut Draft) -> BankResult<T>,
    {
        self.load()?;

        let mut draft = Draft {
            accounts: self.accounts.clone(),
        };
        let value = change(&mut draft)?;

        self.write(&draft.accounts)?;
        self.accounts = draft.accounts;
        Ok(value)
    }

    /// Rewrite the backing files from the in-memory records
    pub fn persist(&mut self) -> BankResult<()> {
        let accounts = self.accounts.clone();
        self.write(&accounts)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn write(&mut self, accounts: &[Account]) -> BankResult<()> {
        let lines = accounts
            .iter()
            .map(RecordCodec::encode)
            .collect::<BankResult<Vec<_>>>()?;

        write_lines_atomic(&self.path, &lines)?;
        self.plans.save_for(accounts)?;
        Ok(())
    }
}
