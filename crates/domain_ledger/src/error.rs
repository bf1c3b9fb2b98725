//! Ledger domain errors

use core_kernel::{JournalEntryId, Money, MoneyError};
use thiserror::Error;

/// Errors that can occur in the ledger domain
///
/// Every posting error is raised before any account is touched, so a
/// rejected entry never leaves the ledger partially updated.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Debit and credit totals differ
    #[error("Unbalanced entry: debits={debit_total}, credits={credit_total}")]
    UnbalancedEntry {
        debit_total: Money,
        credit_total: Money,
    },

    /// A line or account movement with a non-positive amount
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount { amount: Money },

    /// Entry without at least one debit and one credit line
    #[error("Entry requires at least one debit line and one credit line")]
    EmptyEntry,

    /// Account reference that matches no code or name
    #[error("Account not found: {code}")]
    UnknownAccount { code: String },

    /// Account code or name already in the chart
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Unrecognised account type name
    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),

    /// Journal entry not found
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Posting was attempted twice for the same entry
    #[error("Journal entry already posted: {id}")]
    AlreadyPosted { id: JournalEntryId },

    /// Caller-supplied id collides with an existing entry
    #[error("Journal entry id already in use: {0}")]
    DuplicateEntryId(JournalEntryId),

    /// Persisted history that cannot be accepted as-is
    #[error("Inconsistent history: {0}")]
    InconsistentHistory(String),

    #[error("Invalid depreciation policy: {0}")]
    InvalidDepreciationPolicy(String),

    #[error("Cannot close into {code}: closing target must be an equity account")]
    InvalidClosingAccount { code: String },

    #[error("Ledger lock poisoned")]
    LockPoisoned,

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl LedgerError {
    pub fn unknown_account(code: impl Into<String>) -> Self {
        LedgerError::UnknownAccount { code: code.into() }
    }

    pub fn unbalanced(debit_total: Money, credit_total: Money) -> Self {
        LedgerError::UnbalancedEntry {
            debit_total,
            credit_total,
        }
    }

    /// True for the recoverable validation family (bad amounts, empty or
    /// unbalanced entries)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::UnbalancedEntry { .. }
                | LedgerError::InvalidAmount { .. }
                | LedgerError::EmptyEntry
        )
    }
}
