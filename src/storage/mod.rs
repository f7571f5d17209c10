//! Storage layer for simplebank
//!
//! Fixed-width ledger records, the account type sidecar, and the file
//! helpers both rely on. Whole-file rewrites are atomic.

pub mod codec;
pub mod file_io;
pub mod init;
pub mod ledger;
pub mod plans;

pub use codec::RecordCodec;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_ledger, needs_initialization};
pub use ledger::{Draft, Ledger, LineDiagnostic, LoadReport};
pub use plans::PlanRegistry;

use crate::config::paths::BankPaths;

/// An unloaded ledger bound to the files under `paths`
pub fn ledger_for(paths: &BankPaths) -> Ledger {
    Ledger::new(paths.ledger_file(), paths.account_types_file())
}
