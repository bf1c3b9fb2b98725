//! Ledger handle shared between threads
//!
//! Writers are serialized behind one lock and each posting happens inside a
//! single write section, so readers never see a half-applied entry.

use std::sync::{Arc, RwLock};

use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Cloneable, thread-safe handle to a [`Ledger`]
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Runs `f` with shared access; any number of readers may run at once
    pub fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> Result<T, LedgerError> {
        let guard = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Runs `f` with exclusive access
    pub fn write<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> Result<T, LedgerError> {
        let mut guard = self.inner.write().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Takes the ledger back if this is the last handle and the lock is
    /// not poisoned
    pub fn into_inner(self) -> Option<Ledger> {
        Arc::try_unwrap(self.inner).ok()?.into_inner().ok()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
