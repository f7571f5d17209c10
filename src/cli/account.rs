//! Account CLI commands
//!
//! Implements CLI commands for the privileged account workflows.

use clap::Subcommand;

use super::{with_session, SessionArgs};
use crate::config::{BankPaths, Settings};
use crate::display::{format_account_list, format_receipt};
use crate::error::{BankError, BankResult};
use crate::models::AccountType;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Account number (up to 5 digits)
        number: String,
        /// Holder name (up to 20 characters)
        name: String,
        /// Account type (admin, basic, student-plan, non-student-plan)
        #[arg(short = 't', long = "type", default_value = "basic")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Delete an account
    Delete {
        /// Account number
        number: String,
        /// Holder name (must match)
        name: String,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Disable an account
    Disable {
        /// Account number
        number: String,
        /// Holder name (must match)
        name: String,
        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Handle an account command
pub fn handle_account_command(
    paths: &BankPaths,
    settings: &Settings,
    cmd: AccountCommands,
) -> BankResult<()> {
    let receipt = match cmd {
        AccountCommands::Create {
            number,
            name,
            account_type,
            balance,
            session,
        } => {
            let account_type = AccountType::parse(&account_type)
                .ok_or(BankError::InvalidAccountType(account_type))?;

            with_session(paths, settings, &session, |engine| {
                engine.create_account(&number, &name, account_type, &balance)
            })?
        }

        AccountCommands::Delete {
            number,
            name,
            session,
        } => with_session(paths, settings, &session, |engine| {
            engine.delete_account(&number, &name)
        })?,

        AccountCommands::Disable {
            number,
            name,
            session,
        } => with_session(paths, settings, &session, |engine| {
            engine.disable_account(&number, &name)
        })?,
    };

    print!("{}", format_receipt(&receipt));
    Ok(())
}

/// List every account (privileged sessions only)
pub fn handle_view_all(paths: &BankPaths, settings: &Settings, session: &SessionArgs) -> BankResult<()> {
    let accounts = with_session(paths, settings, session, |engine| engine.view_all())?;
    print!("{}", format_account_list(&accounts));
    Ok(())
}
