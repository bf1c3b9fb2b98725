//! Storage adapters
//!
//! Each adapter implements the `LedgerStore` port, so callers can swap the
//! file store for the in-memory one without touching the ledger.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
