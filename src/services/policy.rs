//! Authorization policy for the transaction engine
//!
//! Two ledger variants disagree on how an administrator is recognized: one
//! reads the account type, the other trusts a single canonical identity.
//! Both are kept as named [`AdminPolicy`] choices.

use serde::{Deserialize, Serialize};

use crate::models::{Account, AccountNumber, AccountType, Money};

/// How the engine decides whether an account is privileged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AdminPolicy {
    /// Privileged iff `account_type` is `admin`
    #[default]
    AccountType,
    /// Privileged iff the account is this one number/holder pair
    CanonicalIdentity { number: String, name: String },
}

impl AdminPolicy {
    /// The single built-in administrator: account 1, holder "Admin"
    pub fn canonical_admin() -> Self {
        Self::CanonicalIdentity {
            number: "1".to_string(),
            name: "Admin".to_string(),
        }
    }

    pub fn is_privileged(&self, account: &Account) -> bool {
        match self {
            Self::AccountType => account.account_type == AccountType::Admin,
            Self::CanonicalIdentity { number, name } => {
                AccountNumber::parse(number).is_ok_and(|n| n == account.number)
                    && &account.name == name
            }
        }
    }
}

/// Cumulative per-session caps for non-privileged accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    pub withdraw: Money,
    pub transfer: Money,
    pub bill_payment: Money,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            withdraw: Money::from_cents(50_000),
            transfer: Money::from_cents(100_000),
            bill_payment: Money::from_cents(200_000),
        }
    }
}

/// Allow-list of bill payees
///
/// Entries look like `"Fast Internet, Inc. (FI)"`; a payee may be named by
/// the full entry or by the code in parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayeeList(Vec<String>);

impl PayeeList {
    pub fn new(payees: Vec<String>) -> Self {
        Self(payees)
    }

    /// The allow-list entry `payee` refers to, if any
    pub fn resolve(&self, payee: &str) -> Option<&str> {
        let payee = payee.trim();
        self.0
            .iter()
            .find(|entry| {
                entry.as_str() == payee
                    || payee_code(entry).is_some_and(|code| code.eq_ignore_ascii_case(payee))
            })
            .map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl Default for PayeeList {
    fn default() -> Self {
        Self(vec![
            "The Bright Light Electric Company (EC)".to_string(),
            "Credit Card Company Q (CQ)".to_string(),
            "Fast Internet, Inc. (FI)".to_string(),
        ])
    }
}

/// Code between the trailing parentheses of an entry
fn payee_code(entry: &str) -> Option<&str> {
    let inner = entry.trim_end().strip_suffix(')')?;
    let start = inner.rfind('(')?;
    let code = inner[start + 1..].trim();
    (!code.is_empty()).then_some(code)
}

/// Everything the engine needs besides the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub policy: AdminPolicy,
    pub limits: SessionLimits,
    pub payees: PayeeList,
}

impl EngineConfig {
    /// Default caps and payees under an explicitly chosen admin policy
    pub fn with_policy(policy: AdminPolicy) -> Self {
        Self {
            policy,
            limits: SessionLimits::default(),
            payees: PayeeList::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(number: &str, name: &str, account_type: AccountType) -> Account {
        Account::new(
            AccountNumber::parse(number).unwrap(),
            name,
            account_type,
            Money::zero(),
        )
    }

    #[test]
    fn test_account_type_policy() {
        let policy = AdminPolicy::AccountType;
        assert!(policy.is_privileged(&account("7", "Boss", AccountType::Admin)));
        assert!(!policy.is_privileged(&account("1", "Admin", AccountType::Basic)));
    }

    #[test]
    fn test_canonical_identity_policy() {
        let policy = AdminPolicy::canonical_admin();
        assert!(policy.is_privileged(&account("00001", "Admin", AccountType::Basic)));
        assert!(!policy.is_privileged(&account("1", "admin", AccountType::Admin)));
        assert!(!policy.is_privileged(&account("7", "Admin", AccountType::Admin)));
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&AdminPolicy::AccountType).unwrap();
        assert_eq!(json, r#"{"kind":"account-type"}"#);

        let parsed: AdminPolicy = serde_json::from_str(
            r#"{"kind":"canonical-identity","number":"00001","name":"Admin"}"#,
        )
        .unwrap();
        assert!(parsed.is_privileged(&account("1", "Admin", AccountType::Basic)));
    }

    #[test]
    fn test_payee_resolution() {
        let payees = PayeeList::default();
        assert_eq!(
            payees.resolve("Credit Card Company Q (CQ)"),
            Some("Credit Card Company Q (CQ)")
        );
        assert_eq!(payees.resolve("fi"), Some("Fast Internet, Inc. (FI)"));
        assert_eq!(payees.resolve("Water Co"), None);
        assert_eq!(payees.resolve(""), None);
    }
}
