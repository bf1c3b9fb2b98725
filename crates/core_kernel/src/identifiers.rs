//! Strongly-typed identifiers for ledger entities
//!
//! A newtype around a UUID keeps journal entry identity from being mixed up
//! with account codes or display numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a journal entry, unique for the lifetime of a ledger
///
/// Engine-generated ids are time-ordered (UUID v7). Callers that mint their
/// own ids pass them through [`JournalEntryId::from_uuid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalEntryId(Uuid);

impl JournalEntryId {
    /// Creates a new time-ordered identifier (v7)
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        "JNL"
    }
}

impl Default for JournalEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JournalEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::prefix(), self.0)
    }
}

impl FromStr for JournalEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip prefix if present
        let uuid_str = s.strip_prefix("JNL-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

impl From<Uuid> for JournalEntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<JournalEntryId> for Uuid {
    fn from(id: JournalEntryId) -> Uuid {
        id.0
    }
}
