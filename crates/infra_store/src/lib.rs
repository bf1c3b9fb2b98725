//! Storage Infrastructure Layer
//!
//! This crate keeps the ledger between runs. The domain crate does no I/O;
//! everything it needs to survive a restart is captured in a
//! [`LedgerSnapshot`] and handed to a [`LedgerStore`].
//!
//! # Architecture
//!
//! The crate follows the ports and adapters pattern: `LedgerStore` is the
//! port, `JsonFileStore` and `InMemoryStore` are the adapters.
//!
//! # Snapshot Model
//!
//! Snapshots hold account movements and posted history only. Balances are
//! recomputed from the movements on restore, never read from storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{load_or_default, JsonFileStore, LedgerStore};
//!
//! let store = JsonFileStore::new("ledger_data.json", "backups");
//! let ledger = load_or_default(&store);
//! store.save_ledger(&ledger)?;
//! ```

pub mod adapters;
pub mod error;
pub mod snapshot;
pub mod store;

pub use adapters::{InMemoryStore, JsonFileStore};
pub use error::StorageError;
pub use snapshot::{AccountRecord, EntryRecord, LedgerSnapshot, MovementRecord, SNAPSHOT_VERSION};
pub use store::{load_ledger, load_or_default, LedgerStore};
