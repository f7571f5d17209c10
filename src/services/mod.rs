//! Service layer for simplebank
//!
//! The service layer holds the banking rules on top of the ledger:
//! authorization policy, per-session limits, money operations and the
//! privileged account workflows.

pub mod admin;
pub mod policy;
pub mod session;
pub mod transaction;

pub use policy::{AdminPolicy, EngineConfig, PayeeList, SessionLimits};
pub use session::{CappedOperation, Operator, Session};
pub use transaction::{Receipt, TransactionEngine};
