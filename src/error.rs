//! Custom error types for simplebank
//!
//! Every failure the ledger, codec and transaction engine can report lives in
//! one `thiserror` enum. Decode-time kinds are recovered locally by the ledger
//! loader; all other kinds abort only the current operation.

use thiserror::Error;

use crate::models::Money;

/// The main error type for simplebank operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Record line does not have the fixed total width
    #[error("Malformed record: expected {expected} characters, found {actual}")]
    MalformedLength { expected: usize, actual: usize },

    /// Field separator is not a single space
    #[error("Malformed record: expected a space separator at column {0}")]
    MalformedSeparator(usize),

    /// Status field is not "A" or "D"
    #[error("Invalid status code: '{0}'")]
    InvalidStatus(String),

    /// Balance field is not a fixed-point number
    #[error("Invalid balance format: '{0}'")]
    InvalidBalanceFormat(String),

    /// Balance field parsed to a value below zero
    #[error("Negative balance in record: {0}")]
    NegativeBalance(Money),

    /// Transaction count field is not a non-negative integer of the field width
    #[error("Invalid transaction count: '{0}'")]
    InvalidTransactionCount(String),

    /// Account number is not numeric or does not fit the field
    #[error("Invalid account number: '{0}'")]
    InvalidAccountNumber(String),

    /// Holder name exceeds the name field
    #[error("Account holder name too long ({length} characters, max {max})")]
    NameTooLong { length: usize, max: usize },

    /// Holder name is empty or carries surrounding whitespace
    #[error("Invalid account holder name: '{0}'")]
    InvalidHolderName(String),

    /// Balance outside 0.00..=99999.99
    #[error("Balance out of range: {0} (allowed 0.00 to 99999.99)")]
    InvalidBalanceRange(Money),

    /// Account number already present in the ledger
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// No record matches the account number
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account/holder pair could not be authenticated
    #[error("Authentication failed for account {account}: {reason}")]
    AuthenticationFailed { account: String, reason: String },

    /// Amount could not be parsed or is not positive
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Balance too low for the requested debit
    #[error("Insufficient funds in account {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: String,
        needed: Money,
        available: Money,
    },

    /// Session cap would be exceeded
    #[error("Exceeds maximum {operation} limit for this session ({limit}): would total {attempted}")]
    SessionLimitExceeded {
        operation: &'static str,
        limit: Money,
        attempted: Money,
    },

    /// Operator lacks the privilege the operation requires
    #[error("Unauthorized: {0}")]
    UnauthorizedOperation(String),

    /// Bill payee is not on the allow-list
    #[error("Invalid payee: '{0}'")]
    InvalidPayee(String),

    /// Account type name is not one of the known plans
    #[error("Invalid account type: '{0}' (valid types: admin, basic, student-plan, non-student-plan)")]
    InvalidAccountType(String),

    /// Account is not on the student plan
    #[error("Account {account} is not on the student plan (currently {current})")]
    IneligiblePlanChange { account: String, current: String },

    /// Account is already disabled
    #[error("Account {0} is not active")]
    AccountNotActive(String),

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BankError {
    /// Create a "not found" error for an account number
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::AccountNotFound(identifier.into())
    }

    /// Create an authentication failure
    pub fn authentication(account: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            account: account.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Check if this error comes from decoding a ledger line
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedLength { .. }
                | Self::MalformedSeparator(_)
                | Self::InvalidStatus(_)
                | Self::InvalidBalanceFormat(_)
                | Self::NegativeBalance(_)
                | Self::InvalidTransactionCount(_)
                | Self::InvalidAccountNumber(_)
                | Self::InvalidBalanceRange(_)
        )
    }
}

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for simplebank operations
pub type BankResult<T> = Result<T, BankError>;
