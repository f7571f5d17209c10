//! Account model
//!
//! Represents one bank account record as held in the ledger. Records are
//! treated as values: every change produces a new `Account` rather than
//! editing one that another view may still be holding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{BankError, BankResult};

/// Maximum number of characters in a holder name
pub const MAX_NAME_LEN: usize = 20;

/// Canonical account number: ASCII digits with leading zeros stripped ("0" minimum)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Parse and normalize an account number
    ///
    /// `"00042"` and `"42"` both become `42`. Anything that is not purely
    /// numeric is rejected.
    pub fn parse(s: &str) -> BankResult<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BankError::InvalidAccountNumber(s.to_string()));
        }

        let stripped = s.trim_start_matches('0');
        let canonical = if stripped.is_empty() { "0" } else { stripped };
        Ok(Self(canonical.to_string()))
    }

    /// The canonical digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of significant digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the canonical form has at least one digit
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zero-padded to `width` digits (never truncated)
    pub fn padded(&self, width: usize) -> String {
        format!("{:0>width$}", self.0, width = width)
    }
}

impl FromStr for AccountNumber {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account status as stored in the single-character status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// "A"
    Active,
    /// "D"
    Disabled,
}

impl AccountStatus {
    /// Single-character code written to the ledger
    pub fn code(&self) -> char {
        match self {
            Self::Active => 'A',
            Self::Disabled => 'D',
        }
    }

    /// Parse the status field; only "A" and "D" are accepted
    pub fn from_code(code: &str) -> BankResult<Self> {
        match code {
            "A" => Ok(Self::Active),
            "D" => Ok(Self::Disabled),
            other => Err(BankError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Type of account; governs session limits, privilege and plan changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Administrator account
    Admin,
    /// Standard account
    #[default]
    Basic,
    /// Student payment plan (SP)
    StudentPlan,
    /// Non-student payment plan (NP)
    NonStudentPlan,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "basic" | "standard" => Some(Self::Basic),
            "student-plan" | "student" | "sp" => Some(Self::StudentPlan),
            "non-student-plan" | "non-student" | "np" => Some(Self::NonStudentPlan),
            _ => None,
        }
    }

    /// Two-character plan code used in the misc field of audit records
    pub fn plan_code(&self) -> &'static str {
        match self {
            Self::NonStudentPlan => "NP",
            _ => "SP",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Basic => write!(f, "basic"),
            Self::StudentPlan => write!(f, "student-plan"),
            Self::NonStudentPlan => write!(f, "non-student-plan"),
        }
    }
}

/// A bank account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Canonical account number
    pub number: AccountNumber,

    /// Holder name
    pub name: String,

    pub status: AccountStatus,

    /// Usable balance
    pub balance: Money,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Committed transactions against this account
    pub total_transactions: u32,
}

impl Account {
    /// Create a new active account with no transactions
    pub fn new(
        number: AccountNumber,
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            status: AccountStatus::Active,
            balance,
            account_type,
            total_transactions: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Copy of this record with `amount` removed from the balance
    pub fn debited(&self, amount: Money) -> BankResult<Self> {
        if self.balance < amount {
            return Err(BankError::InsufficientFunds {
                account: self.number.to_string(),
                needed: amount,
                available: self.balance,
            });
        }

        Ok(Self {
            balance: self.balance - amount,
            ..self.clone()
        })
    }

    /// Copy of this record with `amount` added to the balance
    pub fn credited(&self, amount: Money) -> BankResult<Self> {
        let balance = self
            .balance
            .checked_add(amount)
            .filter(Money::is_valid_balance)
            .ok_or_else(|| {
                BankError::InvalidBalanceRange(Money::from_cents(
                    self.balance.cents().saturating_add(amount.cents()),
                ))
            })?;

        Ok(Self {
            balance,
            ..self.clone()
        })
    }

    /// Copy of this record with status Disabled; fails if already disabled
    pub fn disabled(&self) -> BankResult<Self> {
        if !self.is_active() {
            return Err(BankError::AccountNotActive(self.number.to_string()));
        }

        Ok(Self {
            status: AccountStatus::Disabled,
            ..self.clone()
        })
    }

    /// Copy of this record on a different plan
    pub fn with_type(&self, account_type: AccountType) -> Self {
        Self {
            account_type,
            ..self.clone()
        }
    }

    /// Copy of this record with one more committed transaction
    pub fn with_transaction_recorded(&self) -> Self {
        Self {
            total_transactions: self.total_transactions.saturating_add(1),
            ..self.clone()
        }
    }

    /// Validate fields a new account must satisfy
    pub fn validate(&self) -> BankResult<()> {
        if self.name.trim().is_empty() || self.name.trim() != self.name {
            return Err(BankError::InvalidHolderName(self.name.clone()));
        }

        let length = self.name.chars().count();
        if length > MAX_NAME_LEN {
            return Err(BankError::NameTooLong {
                length,
                max: MAX_NAME_LEN,
            });
        }

        if !self.balance.is_valid_balance() {
            return Err(BankError::InvalidBalanceRange(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.number.padded(5), self.name, self.account_type)
    }
}
