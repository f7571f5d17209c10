//! simplebank - fixed-width account ledger with session-capped transactions
//!
//! This library provides the core functionality for the simplebank command
//! line tool. Accounts live in a fixed-width text ledger; a transaction
//! engine authenticates one operator per session, enforces per-session caps
//! and writes every committed change back to the ledger before appending it
//! to a transaction log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: File locations and user settings
//! - `error`: Custom error types
//! - `models`: Account records and money
//! - `storage`: Fixed-width record codec and the ledger
//! - `services`: Admin policy, sessions and the transaction engine
//! - `audit`: Append-only transaction log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use simplebank::config::{BankPaths, Settings};
//! use simplebank::services::TransactionEngine;
//! use simplebank::storage::ledger_for;
//!
//! let paths = BankPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut engine = TransactionEngine::begin_session(
//!     ledger_for(&paths),
//!     settings.engine_config(),
//!     None,
//!     "42",
//!     "Jane Doe",
//! )?;
//! engine.withdraw("42", "Jane Doe", "200.00")?;
//! engine.end_session()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BankError, BankResult};
