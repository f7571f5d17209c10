//! Storage initialization
//!
//! Handles first-run setup: the base directory, an empty ledger file and
//! the built-in administrator account.

use crate::config::paths::BankPaths;
use crate::error::BankResult;
use crate::models::{Account, AccountNumber, AccountType, Money};

use super::ledger_for;

/// Holder name of the built-in administrator
pub const ADMIN_NAME: &str = "Admin";

/// Opening balance of the built-in administrator (1000.00)
const ADMIN_BALANCE: Money = Money::from_cents(100_000);

/// Prepare a ledger under `paths`
///
/// Seeds account `00001 Admin` when the ledger has no account 1 and returns
/// it; returns `None` when nothing had to be created. Existing records are
/// never touched.
pub fn initialize_ledger(paths: &BankPaths) -> BankResult<Option<Account>> {
    paths.ensure_directories()?;

    let mut ledger = ledger_for(paths);
    ledger.load()?;

    let number = AccountNumber::parse("1")?;
    if ledger.find(&number).is_some() {
        return Ok(None);
    }

    let admin = Account::new(number, ADMIN_NAME, AccountType::Admin, ADMIN_BALANCE);
    ledger.insert(admin.clone())?;
    log::info!("Created administrator account {}", admin.number);
    Ok(Some(admin))
}

/// Check if a ledger still needs initialization
pub fn needs_initialization(paths: &BankPaths) -> bool {
    !paths.is_initialized()
}
