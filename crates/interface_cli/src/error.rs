//! CLI error types

use domain_ledger::LedgerError;
use infra_store::StorageError;
use thiserror::Error;

/// Errors surfaced by a command run
#[derive(Debug, Error)]
pub enum CliError {
    /// The ledger rejected the command
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Loading or saving the books failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
