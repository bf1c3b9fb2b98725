//! Storage error types
//!
//! This module defines the errors that can occur while loading or saving
//! a ledger, keeping I/O, format and consistency failures apart.

use domain_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing or moving a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data decoded but does not describe a valid ledger
    #[error("Corrupt ledger data: {0}")]
    Corrupt(String),

    /// The ledger rejected the restored accounts or history
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Creates a corrupt-data error for a specific record
    ///
    /// # Arguments
    ///
    /// * `record` - What was being restored (e.g., "account 1000")
    /// * `reason` - Why it was rejected
    pub fn corrupt(record: &str, reason: impl std::fmt::Display) -> Self {
        StorageError::Corrupt(format!("{}: {}", record, reason))
    }

    /// Checks if the stored data itself is unusable, as opposed to the
    /// store being unreachable
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StorageError::Serialization(_) | StorageError::Corrupt(_) | StorageError::Ledger(_)
        )
    }
}
