//! Serializable ledger snapshots
//!
//! A snapshot holds every account with its debit and credit movements and
//! the full posted history. Balances are never stored: restoring replays
//! the movements through the account API and lets the ledger derive
//! everything else.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{JournalEntryId, Money};
use domain_ledger::{
    Account, AccountEntry, AccountType, EntryLine, EntryStatus, JournalEntry, Ledger, PostingType,
};

use crate::error::StorageError;

/// Format version written into every snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// One movement on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub entry_id: Option<JournalEntryId>,
    pub line: u32,
}

impl From<&AccountEntry> for MovementRecord {
    fn from(entry: &AccountEntry) -> Self {
        Self {
            amount: entry.amount,
            date: entry.date,
            description: entry.description.clone(),
            entry_id: entry.entry_id,
            line: entry.line,
        }
    }
}

impl From<MovementRecord> for AccountEntry {
    fn from(record: MovementRecord) -> Self {
        Self {
            amount: record.amount,
            date: record.date,
            description: record.description,
            entry_id: record.entry_id,
            line: record.line,
        }
    }
}

/// An account and its movements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub category: String,
    pub created_on: NaiveDate,
    pub debits: Vec<MovementRecord>,
    pub credits: Vec<MovementRecord>,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            code: account.code().to_string(),
            name: account.name().to_string(),
            account_type: account.account_type(),
            category: account.category().to_string(),
            created_on: account.created_on(),
            debits: account.debits().iter().map(MovementRecord::from).collect(),
            credits: account.credits().iter().map(MovementRecord::from).collect(),
        }
    }
}

impl AccountRecord {
    /// Rebuilds the account by replaying every stored movement
    fn restore(self) -> Result<Account, StorageError> {
        let record = format!("account {}", self.code);
        let mut account = Account::new(self.code, self.name, self.account_type, self.category)
            .opened_on(self.created_on);

        let movements = self
            .debits
            .into_iter()
            .map(|m| (PostingType::Debit, m))
            .chain(self.credits.into_iter().map(|m| (PostingType::Credit, m)));
        for (posting_type, movement) in movements {
            account
                .replay(posting_type, movement.into())
                .map_err(|e| StorageError::corrupt(&record, e))?;
        }
        Ok(account)
    }
}

/// A posted journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: JournalEntryId,
    pub number: u64,
    pub date: NaiveDate,
    pub description: String,
    pub lines: Vec<EntryLine>,
    /// Either side's total, kept for readers of the raw file
    pub amount: Money,
    pub posted_at: DateTime<Utc>,
}

impl EntryRecord {
    fn capture(entry: &JournalEntry) -> Option<Self> {
        let EntryStatus::Posted { number, posted_at } = entry.status() else {
            return None;
        };
        Some(Self {
            id: entry.id(),
            number,
            date: entry.date(),
            description: entry.description().to_string(),
            lines: entry.lines().to_vec(),
            amount: entry.amount(),
            posted_at,
        })
    }

    fn restore(self) -> Result<JournalEntry, StorageError> {
        let record = format!("entry {}", self.id);
        let entry = JournalEntry::from_history(
            self.id,
            self.number,
            self.date,
            self.description,
            self.lines,
            self.posted_at,
        )
        .map_err(|e| StorageError::corrupt(&record, e))?;

        if entry.amount() != self.amount {
            return Err(StorageError::corrupt(
                &record,
                format!("lines total {} but amount is {}", entry.amount(), self.amount),
            ));
        }
        Ok(entry)
    }
}

/// Complete serializable state of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub accounts: Vec<AccountRecord>,
    /// Posted entries in posting order
    pub entries: Vec<EntryRecord>,
}

impl LedgerSnapshot {
    /// Captures accounts and posted history; unposted entries are not kept
    pub fn capture(ledger: &Ledger) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            accounts: ledger.accounts().map(AccountRecord::from).collect(),
            entries: ledger
                .entries_chronological()
                .filter_map(EntryRecord::capture)
                .collect(),
        }
    }

    /// Rebuilds the ledger
    ///
    /// # Errors
    ///
    /// - `Corrupt` for an unknown version, a non-positive movement, an
    ///   invalid entry or account movements whose debits and credits differ
    /// - `Ledger` if the accounts or history are inconsistent with each other
    pub fn restore(self) -> Result<Ledger, StorageError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StorageError::Corrupt(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        let accounts = self
            .accounts
            .into_iter()
            .map(AccountRecord::restore)
            .collect::<Result<Vec<_>, _>>()?;

        let debits: Money = accounts.iter().map(Account::total_debits).sum();
        let credits: Money = accounts.iter().map(Account::total_credits).sum();
        if debits != credits {
            return Err(StorageError::Corrupt(format!(
                "account movements do not balance: debits={}, credits={}",
                debits, credits
            )));
        }

        let history = self
            .entries
            .into_iter()
            .map(EntryRecord::restore)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Ledger::from_parts(accounts, history)?)
    }
}
