//! Core data models for simplebank
//!
//! Account records and the money type they carry.

pub mod account;
pub mod money;

pub use account::{Account, AccountNumber, AccountStatus, AccountType, MAX_NAME_LEN};
pub use money::{Money, MoneyParseError, MAX_BALANCE};
