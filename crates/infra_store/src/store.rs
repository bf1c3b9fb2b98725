//! Ledger storage port
//!
//! The `LedgerStore` trait is the only contract between the ledger and
//! wherever it is kept. Adapters:
//!
//! - **JsonFileStore**: pretty JSON file with timestamped backups
//! - **InMemoryStore**: keeps the snapshot in memory, for tests and embedding
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_store::{load_or_default, JsonFileStore, LedgerSnapshot, LedgerStore};
//!
//! let store = JsonFileStore::new("ledger_data.json", "backups");
//! let mut ledger = load_or_default(&store);
//! // ... post entries ...
//! store.save(&LedgerSnapshot::capture(&ledger))?;
//! ```

use tracing::{info, warn};

use domain_ledger::Ledger;

use crate::error::StorageError;
use crate::snapshot::LedgerSnapshot;

/// Load/save contract for ledger snapshots
pub trait LedgerStore {
    /// Loads the stored snapshot, `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError>;

    /// Replaces the stored snapshot
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StorageError>;

    /// Captures and saves a ledger in one step
    fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        self.save(&LedgerSnapshot::capture(ledger))
    }
}

/// Loads and restores the stored ledger
///
/// `Ok(None)` when the store is empty.
pub fn load_ledger(store: &impl LedgerStore) -> Result<Option<Ledger>, StorageError> {
    store.load()?.map(LedgerSnapshot::restore).transpose()
}

/// Loads the stored ledger, falling back to a freshly seeded one
///
/// Any read, decode or restore failure is logged and replaced by
/// [`Ledger::with_standard_chart`]; the broken data is left in place until
/// the next save copies it into the backups.
pub fn load_or_default(store: &impl LedgerStore) -> Ledger {
    match load_ledger(store) {
        Ok(Some(ledger)) => {
            info!(
                accounts = ledger.accounts().count(),
                entries = ledger.entry_count(),
                "Loaded ledger"
            );
            ledger
        }
        Ok(None) => {
            info!("No saved ledger found, starting from the standard chart");
            Ledger::with_standard_chart()
        }
        Err(e) => {
            warn!(error = %e, corrupt = e.is_corrupt(), "Could not load ledger, starting from the standard chart");
            Ledger::with_standard_chart()
        }
    }
}
