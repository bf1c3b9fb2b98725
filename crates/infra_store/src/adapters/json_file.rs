//! JSON file adapter
//!
//! The ledger is kept in one pretty-printed JSON file. A save writes the new
//! contents next to the data file first, copies the current file into the
//! backup directory under a timestamped name and then renames the new file
//! over the old one. A failed save leaves the data file as it was.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::snapshot::LedgerSnapshot;
use crate::store::LedgerStore;

/// File-backed ledger store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store; nothing is touched on disk until the first save
    ///
    /// # Arguments
    ///
    /// * `data_file` - Path of the JSON data file
    /// * `backup_dir` - Directory receiving the previous file on each save
    pub fn new(data_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the current data file into the backup directory
    ///
    /// Returns the backup path, or `None` when there was no file to move.
    pub fn backup(&self) -> Result<Option<PathBuf>, StorageError> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        fs::create_dir_all(&self.backup_dir)?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S_%6f").to_string();
        let mut target = self.backup_dir.join(format!("backup_{}.json", stamp));
        let mut attempt = 1;
        while target.exists() {
            target = self.backup_dir.join(format!("backup_{}_{}.json", stamp, attempt));
            attempt += 1;
        }

        fs::copy(&self.data_file, &target)?;
        debug!(backup = %target.display(), "Backed up ledger file");
        Ok(Some(target))
    }

    /// Path the next save is written to before it replaces the data file
    pub fn staging_file(&self) -> PathBuf {
        let mut name = self.data_file.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Backup files currently in the backup directory, oldest first
    pub fn backups(&self) -> Result<Vec<PathBuf>, StorageError> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_backup = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("backup_") && n.ends_with(".json"));
            if is_backup {
                backups.push(path);
            }
        }
        backups.sort();
        Ok(backups)
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError> {
        let contents = match fs::read_to_string(&self.data_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&contents)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let staging = self.staging_file();
        fs::write(&staging, contents)?;

        let replaced = self
            .backup()
            .and_then(|_| fs::rename(&staging, &self.data_file).map_err(StorageError::from));
        if let Err(e) = replaced {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(file = %staging.display(), error = %cleanup, "Could not remove staged ledger file");
            }
            return Err(e);
        }

        debug!(
            file = %self.data_file.display(),
            accounts = snapshot.accounts.len(),
            entries = snapshot.entries.len(),
            "Saved ledger"
        );
        Ok(())
    }
}
