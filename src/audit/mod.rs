//! Transaction log for simplebank
//!
//! Every committed transaction is appended to an append-only log as a
//! fixed-width line, and each session closes with an end-of-session
//! sentinel.
//!
//! - `AuditRecord`: one committed transaction (code, holder, account,
//!   amount, misc).
//! - `AuditLogger`: appends records to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use simplebank::audit::{AuditLogger, AuditRecord, TransactionCode};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditRecord::new(
//!     TransactionCode::Withdraw,
//!     "Jane Doe",
//!     &number,
//!     Money::from_cents(20_000),
//!     "SP",
//! ))?;
//! logger.log(&AuditRecord::end_of_session())?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditRecord, TransactionCode};
pub use logger::AuditLogger;
