//! In-memory adapter

use std::sync::Mutex;

use crate::error::StorageError;
use crate::snapshot::LedgerSnapshot;
use crate::store::LedgerStore;

/// Store that keeps the last saved snapshot in memory
///
/// The snapshot goes through its JSON form on every save, so it exercises
/// the same encoding as the file store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contents: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding raw contents, e.g. to simulate a
    /// damaged file
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|s| *s).unwrap_or_default()
    }

    /// Raw JSON of the last save
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl LedgerStore for InMemoryStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError> {
        let contents = self.contents.lock().map_err(|_| StorageError::LockPoisoned)?;
        contents
            .as_deref()
            .map(|c| serde_json::from_str(c))
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(snapshot)?;
        *self.contents.lock().map_err(|_| StorageError::LockPoisoned)? = Some(encoded);
        *self.saves.lock().map_err(|_| StorageError::LockPoisoned)? += 1;
        Ok(())
    }
}
