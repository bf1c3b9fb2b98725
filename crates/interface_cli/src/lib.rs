//! Command-Line Interface Layer
//!
//! This crate provides the `ledger` command: it loads the books from a
//! [`LedgerStore`], runs one command against them and saves them again when
//! the command changed anything.
//!
//! # Commands
//!
//! - **post**, **reverse**: record journal entries
//! - **trial-balance**, **income-statement**, **balance-sheet**: reports
//! - **statement**, **t-accounts**, **journal**, **accounts**: account views
//! - **depreciate**, **close**: period-end procedures
//! - **demo**: replace the books with a sample scenario
//!
//! # Configuration
//!
//! Settings come from `LEDGER_*` environment variables (see
//! [`config::CliConfig`]); the global `--data-file`, `--backup-dir` and
//! `--log-level` flags override them.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use args::{Cli, Command, LineArg};
pub use config::CliConfig;
pub use error::CliError;

use infra_store::{load_or_default, JsonFileStore, LedgerStore};
use tracing::info;

/// Runs a command against the books held by `store`
///
/// The store is only written when the command changes the ledger and
/// succeeds; a rejected command leaves the stored books as they were.
pub fn run(command: &Command, config: &CliConfig, store: &impl LedgerStore) -> Result<String, CliError> {
    let mut ledger = load_or_default(store);
    let output = commands::execute(command, config, &mut ledger)?;

    if command.is_mutating() {
        store.save_ledger(&ledger)?;
        info!(entries = ledger.entry_count(), "Ledger saved");
    }
    Ok(output)
}

/// Builds the file store described by the configuration
pub fn file_store(config: &CliConfig) -> JsonFileStore {
    JsonFileStore::new(config.data_file.clone(), config.backup_dir.clone())
}
