//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, receipts and the
//! transaction log for terminal display.

pub mod account;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use transaction::{format_audit_log, format_receipt};
