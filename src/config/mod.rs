//! Configuration module for simplebank
//!
//! - Explicit file locations rooted at one base directory
//! - Settings persistence (admin policy, session caps, payees)

pub mod paths;
pub mod settings;

pub use paths::BankPaths;
pub use settings::Settings;
