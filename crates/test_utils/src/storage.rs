//! Storage Test Utilities
//!
//! Provides a file store rooted in a temporary directory that is removed
//! when the test ends.

use std::fs;
use std::path::{Path, PathBuf};

use domain_ledger::Ledger;
use infra_store::{JsonFileStore, LedgerStore};
use tempfile::TempDir;

/// Name of the data file inside the temporary directory
pub const TEST_DATA_FILE: &str = "ledger_data.json";

/// Name of the backup directory inside the temporary directory
pub const TEST_BACKUP_DIR: &str = "backups";

/// A JSON file store living in its own temporary directory
pub struct TestStore {
    dir: TempDir,
    pub store: JsonFileStore,
}

impl TestStore {
    /// Creates an empty store
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created
    pub fn new() -> Self {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("Could not create temporary directory: {}", e),
        };
        let store = JsonFileStore::new(dir.path().join(TEST_DATA_FILE), dir.path().join(TEST_BACKUP_DIR));
        Self { dir, store }
    }

    /// Creates a store already holding `ledger`
    pub fn with_ledger(ledger: &Ledger) -> Self {
        let test_store = Self::new();
        if let Err(e) = test_store.store.save_ledger(ledger) {
            panic!("Could not save test ledger: {}", e);
        }
        test_store
    }

    /// Creates a store whose data file holds arbitrary text
    pub fn with_raw_contents(contents: &str) -> Self {
        let test_store = Self::new();
        test_store.write_raw(contents);
        test_store
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.store.data_file().to_path_buf()
    }

    /// Overwrites the data file without going through the store
    pub fn write_raw(&self, contents: &str) {
        if let Err(e) = fs::write(self.store.data_file(), contents) {
            panic!("Could not write data file: {}", e);
        }
    }

    /// Reads the data file without going through the store
    pub fn read_raw(&self) -> String {
        fs::read_to_string(self.store.data_file()).unwrap_or_default()
    }

    /// Number of backup files written so far
    pub fn backup_count(&self) -> usize {
        self.store.backups().map(|b| b.len()).unwrap_or_default()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
