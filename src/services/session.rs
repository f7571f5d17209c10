//! Login session state
//!
//! A session lives as long as one engine instance. Its counters are never
//! persisted; a new session starts from zero.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::models::{AccountNumber, Money};

/// The authenticated account a session runs as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub number: AccountNumber,
    pub name: String,
    /// Whether the admin policy recognizes this account
    pub privileged: bool,
}

/// Session caps that apply to an operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CappedOperation {
    Withdraw,
    Transfer,
    BillPayment,
}

impl CappedOperation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Withdraw => "withdrawal",
            Self::Transfer => "transfer",
            Self::BillPayment => "bill payment",
        }
    }
}

/// Counters and bookkeeping for one login session
#[derive(Debug, Clone)]
pub struct Session {
    pub started_at: DateTime<Utc>,
    pub operator: Operator,
    withdrawn: Money,
    transferred: Money,
    bills_paid: Money,
    pending_deposits: HashMap<AccountNumber, Money>,
    created: HashSet<AccountNumber>,
}

impl Session {
    pub fn new(operator: Operator) -> Self {
        Self {
            started_at: Utc::now(),
            operator,
            withdrawn: Money::zero(),
            transferred: Money::zero(),
            bills_paid: Money::zero(),
            pending_deposits: HashMap::new(),
            created: HashSet::new(),
        }
    }

    /// Cumulative committed amount for a capped operation
    pub fn total(&self, operation: CappedOperation) -> Money {
        match operation {
            CappedOperation::Withdraw => self.withdrawn,
            CappedOperation::Transfer => self.transferred,
            CappedOperation::BillPayment => self.bills_paid,
        }
    }

    pub fn record(&mut self, operation: CappedOperation, amount: Money) {
        let counter = match operation {
            CappedOperation::Withdraw => &mut self.withdrawn,
            CappedOperation::Transfer => &mut self.transferred,
            CappedOperation::BillPayment => &mut self.bills_paid,
        };
        *counter += amount;
    }

    /// Deposits made this session that are not yet spendable
    pub fn pending_deposit(&self, number: &AccountNumber) -> Money {
        self.pending_deposits
            .get(number)
            .copied()
            .unwrap_or_default()
    }

    pub fn add_pending_deposit(&mut self, number: &AccountNumber, amount: Money) {
        *self.pending_deposits.entry(number.clone()).or_default() += amount;
    }

    pub fn mark_created(&mut self, number: &AccountNumber) {
        self.created.insert(number.clone());
    }

    /// Whether the account was opened during this session
    pub fn created_this_session(&self, number: &AccountNumber) -> bool {
        self.created.contains(number)
    }
}
