//! Transaction CLI commands
//!
//! Money operations and the transaction log viewer. Each command acts on
//! the logged-in account unless `--account`/`--holder` name another one.

use clap::Subcommand;

use super::{with_session, SessionArgs, TargetArgs};
use crate::audit::AuditLogger;
use crate::config::{BankPaths, Settings};
use crate::display::{format_audit_log, format_receipt};
use crate::error::BankResult;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Withdraw money
    Withdraw {
        /// Amount (e.g., "200" or "200.00")
        amount: String,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Deposit money (available from the next session)
    Deposit {
        /// Amount (e.g., "200" or "200.00")
        amount: String,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Transfer money to another account
    Transfer {
        /// Destination account number
        to: String,
        /// Amount (e.g., "200" or "200.00")
        amount: String,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Pay a bill to an allowed company
    PayBill {
        /// Company name or code (EC, CQ, FI)
        payee: String,
        /// Amount (e.g., "200" or "200.00")
        amount: String,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Move a student-plan account to the non-student plan
    ChangePlan {
        /// Account number
        number: String,
        /// Holder name (must match)
        name: String,
        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    paths: &BankPaths,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BankResult<()> {
    let receipt = match cmd {
        TransactionCommands::Withdraw {
            amount,
            target,
            session,
        } => {
            let (number, holder) = target.resolve(&session);
            with_session(paths, settings, &session, |engine| {
                engine.withdraw(&number, &holder, &amount)
            })?
        }

        TransactionCommands::Deposit {
            amount,
            target,
            session,
        } => {
            let (number, holder) = target.resolve(&session);
            with_session(paths, settings, &session, |engine| {
                engine.deposit(&number, &holder, &amount)
            })?
        }

        TransactionCommands::Transfer {
            to,
            amount,
            target,
            session,
        } => {
            let (number, holder) = target.resolve(&session);
            with_session(paths, settings, &session, |engine| {
                engine.transfer(&number, &holder, &to, &amount)
            })?
        }

        TransactionCommands::PayBill {
            payee,
            amount,
            target,
            session,
        } => {
            let (number, holder) = target.resolve(&session);
            with_session(paths, settings, &session, |engine| {
                engine.pay_bill(&number, &holder, &payee, &amount)
            })?
        }

        TransactionCommands::ChangePlan {
            number,
            name,
            session,
        } => with_session(paths, settings, &session, |engine| {
            engine.change_plan(&number, &name)
        })?,
    };

    print!("{}", format_receipt(&receipt));
    Ok(())
}

/// Print the most recent transaction log records
pub fn handle_log_command(paths: &BankPaths, limit: usize) -> BankResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let records = logger.read_recent(limit)?;
    print!("{}", format_audit_log(&records));
    Ok(())
}
