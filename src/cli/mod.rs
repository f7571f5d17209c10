//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the transaction engine. Every
//! transactional command opens a session, makes one engine call and ends
//! the session.

pub mod account;
pub mod shell;
pub mod transaction;

pub use account::{handle_account_command, handle_view_all, AccountCommands};
pub use shell::{handle_shell, run_shell};
pub use transaction::{handle_log_command, handle_transaction_command, TransactionCommands};

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::{BankPaths, Settings};
use crate::error::{BankError, BankResult};
use crate::services::TransactionEngine;
use crate::storage::ledger_for;

/// Credentials that open a session
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Account number to log in as
    #[arg(long = "as", value_name = "NUMBER", env = "SIMPLEBANK_ACCOUNT")]
    pub login: String,

    /// Holder name of that account (exact match)
    #[arg(long = "name", value_name = "NAME", env = "SIMPLEBANK_NAME")]
    pub login_name: String,
}

/// Account an operation acts on, defaulting to the logged-in account
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Act on this account instead of the logged-in one
    #[arg(long, requires = "holder")]
    pub account: Option<String>,

    /// Holder name of --account
    #[arg(long, requires = "account")]
    pub holder: Option<String>,
}

impl TargetArgs {
    /// The (number, holder) pair to act on
    pub fn resolve(&self, session: &SessionArgs) -> (String, String) {
        match (&self.account, &self.holder) {
            (Some(account), Some(holder)) => (account.clone(), holder.clone()),
            _ => (session.login.clone(), session.login_name.clone()),
        }
    }
}

/// Authenticate and start a session against the ledger under `paths`
pub fn open_session(
    paths: &BankPaths,
    settings: &Settings,
    args: &SessionArgs,
) -> BankResult<TransactionEngine> {
    if !paths.is_initialized() {
        return Err(BankError::Config(format!(
            "No ledger found in {}; run 'simplebank init' first",
            paths.base_dir().display()
        )));
    }

    let audit = settings
        .audit_enabled
        .then(|| AuditLogger::new(paths.audit_log()));

    TransactionEngine::begin_session(
        ledger_for(paths),
        settings.engine_config(),
        audit,
        &args.login,
        &args.login_name,
    )
}

/// Run `operation` inside a session that is always ended afterwards
///
/// The operation's own result is returned even when closing the session
/// fails; that failure is only logged.
pub fn with_session<T, F>(
    paths: &BankPaths,
    settings: &Settings,
    args: &SessionArgs,
    operation: F,
) -> BankResult<T>
where
    F: FnOnce(&mut TransactionEngine) -> BankResult<T>,
{
    let mut engine = open_session(paths, settings, args)?;
    let result = operation(&mut engine);
    if let Err(e) = engine.end_session() {
        log::error!("Failed to close session: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::initialize_ledger;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BankPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_ledger(&paths).unwrap();
        (temp_dir, paths)
    }

    fn admin() -> SessionArgs {
        SessionArgs {
            login: "1".into(),
            login_name: "Admin".into(),
        }
    }

    #[test]
    fn test_requires_initialized_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        let result = open_session(&paths, &Settings::default(), &admin());
        assert!(matches!(result, Err(BankError::Config(_))));
    }

    #[test]
    fn test_unwritable_log_keeps_operation_result() {
        let (_temp_dir, paths) = setup();
        // A directory where the log file should be makes every append fail
        std::fs::create_dir_all(paths.audit_log()).unwrap();
        let settings = Settings::default();

        let receipt = with_session(&paths, &settings, &admin(), |engine| {
            engine.withdraw("1", "Admin", "10")
        })
        .unwrap();
        assert_eq!(receipt.account.balance.cents(), 99_000);

        let err = with_session(&paths, &settings, &admin(), |engine| {
            engine.withdraw("1", "Admin", "abc")
        })
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount(_)));
    }

    #[test]
    fn test_target_defaults_to_login() {
        let session = admin();
        assert_eq!(
            TargetArgs::default().resolve(&session),
            ("1".to_string(), "Admin".to_string())
        );
        let target = TargetArgs {
            account: Some("42".into()),
            holder: Some("Jane Doe".into()),
        };
        assert_eq!(target.resolve(&session), ("42".to_string(), "Jane Doe".to_string()));
    }
}
