//! Append-only transaction log
//!
//! Each committed transaction is appended as one fixed-width line and the
//! file is flushed after every write.

use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::storage::file_io::{append_line, read_lines};

use super::entry::AuditRecord;

/// Writes [`AuditRecord`]s to the transaction log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one record
    pub fn log(&self, record: &AuditRecord) -> BankResult<()> {
        append_line(&self.log_path, &record.encode())
    }

    /// Append several records in order
    pub fn log_batch(&self, records: &[AuditRecord]) -> BankResult<()> {
        for record in records {
            self.log(record)?;
        }
        Ok(())
    }

    /// Read every record, oldest first
    pub fn read_all(&self) -> BankResult<Vec<AuditRecord>> {
        read_lines(&self.log_path)?
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                AuditRecord::decode(line).map_err(|e| {
                    BankError::Storage(format!("Transaction log line {}: {}", index + 1, e))
                })
            })
            .collect()
    }

    /// The most recent `count` records
    pub fn read_recent(&self, count: usize) -> BankResult<Vec<AuditRecord>> {
        let mut records = self.read_all()?;
        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
