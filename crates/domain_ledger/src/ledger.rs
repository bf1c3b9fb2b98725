//! Double-entry ledger implementation
//!
//! This module provides the core ledger functionality, ensuring that
//! every posted entry is balanced and applied to its accounts atomically.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

use core_kernel::{today, JournalEntryId, Money};

use crate::account::{Account, AccountCategory, AccountType};
use crate::chart::ChartOfAccounts;
use crate::error::LedgerError;
use crate::journal::{EntryLine, JournalEntry, Transaction};

/// The ledger: chart of accounts plus journal history
///
/// The Ledger is the only component that appends movements to accounts.
///
/// # Invariants
///
/// - Every posted entry is balanced (debits = credits)
/// - Validation completes before any account is touched, so a rejected
///   entry leaves every account unchanged
/// - Account balances are always derived from entry lists, never stored
/// - Historical entries are never modified or removed (only reversed by a
///   new entry)
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Chart of accounts, keyed and ordered by code
    accounts: BTreeMap<String, Account>,
    /// Posted entries in posting order
    history: Vec<JournalEntry>,
    /// Position of each posted entry in `history`
    history_index: HashMap<JournalEntryId, usize>,
    /// Validated entries awaiting posting
    pending: HashMap<JournalEntryId, JournalEntry>,
}

impl Ledger {
    /// Creates an empty ledger with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger seeded with the standard chart of accounts
    pub fn with_standard_chart() -> Self {
        Self::with_standard_chart_on(today())
    }

    /// Creates a seeded ledger whose accounts are opened on `opened_on`
    pub fn with_standard_chart_on(opened_on: NaiveDate) -> Self {
        let mut ledger = Self::new();
        for account in ChartOfAccounts::standard_accounts(opened_on) {
            ledger.accounts.insert(account.code().to_string(), account);
        }
        ledger
    }

    /// Rebuilds a ledger from accounts and posted history
    ///
    /// The accounts must already carry their replayed movements. History is
    /// ordered by display number.
    ///
    /// # Errors
    ///
    /// - `AccountAlreadyExists` on duplicate account codes or names
    /// - `InconsistentHistory` if an entry is unposted or numbers repeat
    /// - `DuplicateEntryId` if two entries share an id
    /// - `UnknownAccount` if an entry references a missing account
    pub fn from_parts(accounts: Vec<Account>, history: Vec<JournalEntry>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for account in accounts {
            ledger.insert_account(account)?;
        }

        let mut history = history;
        history.sort_by_key(JournalEntry::number);

        for (position, entry) in history.iter().enumerate() {
            let expected = position as u64 + 1;
            if entry.number() != Some(expected) {
                return Err(LedgerError::InconsistentHistory(format!(
                    "entry {} has number {:?}, expected {}",
                    entry.id(),
                    entry.number(),
                    expected
                )));
            }
            for line in entry.lines() {
                if !ledger.accounts.contains_key(&line.account) {
                    return Err(LedgerError::unknown_account(line.account.clone()));
                }
            }
            if ledger.history_index.insert(entry.id(), position).is_some() {
                return Err(LedgerError::DuplicateEntryId(entry.id()));
            }
        }
        ledger.history = history;

        Ok(ledger)
    }

    /// Adds an account to the chart of accounts
    ///
    /// # Arguments
    ///
    /// * `code` - Unique account code
    /// * `name` - Unique display name
    /// * `account_type` - Type of account
    /// * `category` - Classification label
    ///
    /// # Errors
    ///
    /// Returns `AccountAlreadyExists` if the code or the name is taken
    pub fn create_account(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        category: impl Into<AccountCategory>,
    ) -> Result<&Account, LedgerError> {
        let account = Account::new(code, name, account_type, category);
        let code = account.code().to_string();
        self.insert_account(account)?;
        self.account(&code)
            .ok_or_else(|| LedgerError::unknown_account(code.clone()))
    }

    fn insert_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(account.code()) {
            return Err(LedgerError::AccountAlreadyExists(account.code().to_string()));
        }
        if self.account_by_name(account.name()).is_some() {
            return Err(LedgerError::AccountAlreadyExists(account.name().to_string()));
        }
        self.accounts.insert(account.code().to_string(), account);
        Ok(())
    }

    /// Gets an account by code
    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Gets an account by display name
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.name() == name)
    }

    /// Resolves a reference that may be either a code or a name
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` when neither matches
    pub fn resolve(&self, reference: &str) -> Result<&Account, LedgerError> {
        self.account(reference)
            .or_else(|| self.account_by_name(reference))
            .ok_or_else(|| LedgerError::unknown_account(reference))
    }

    /// All accounts in code order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts of one type in code order
    pub fn accounts_by_type(&self, account_type: AccountType) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(move |a| a.account_type() == account_type)
    }

    /// Current balance of an account, in its natural sign
    pub fn balance(&self, reference: &str) -> Result<Money, LedgerError> {
        self.resolve(reference).map(Account::balance)
    }

    /// Builds and validates an entry with a generated id, without posting it
    ///
    /// Account references may be codes or names; they are stored as codes.
    pub fn new_journal_entry(
        &mut self,
        lines: Vec<EntryLine>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<JournalEntryId, LedgerError> {
        self.new_journal_entry_with_id(JournalEntryId::new(), lines, description, date)
    }

    /// Builds and validates an entry with a caller-supplied id
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntryId` if the id has been used before, plus any
    /// validation error from [`JournalEntry::new`]
    pub fn new_journal_entry_with_id(
        &mut self,
        id: JournalEntryId,
        lines: Vec<EntryLine>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<JournalEntryId, LedgerError> {
        if self.history_index.contains_key(&id) || self.pending.contains_key(&id) {
            return Err(LedgerError::DuplicateEntryId(id));
        }

        let mut entry = JournalEntry::new(id, date.unwrap_or_else(today), description, lines)
            .inspect_err(|e| warn!(error = %e, "Rejected journal entry"))?;

        for line in entry.lines_mut() {
            let code = self
                .resolve(&line.account)
                .inspect_err(|e| warn!(error = %e, "Rejected journal entry"))?
                .code()
                .to_string();
            line.account = code;
        }

        self.pending.insert(id, entry);
        Ok(id)
    }

    /// Posts a validated entry to its accounts
    ///
    /// # Errors
    ///
    /// - `AlreadyPosted` if the entry is already in history
    /// - `EntryNotFound` if no such entry was built
    #[instrument(skip(self), fields(entry = %id))]
    pub fn post_entry(&mut self, id: JournalEntryId) -> Result<&JournalEntry, LedgerError> {
        if self.history_index.contains_key(&id) {
            warn!("Attempted to repost a journal entry");
            return Err(LedgerError::AlreadyPosted { id });
        }
        let Some(mut entry) = self.pending.remove(&id) else {
            return Err(LedgerError::EntryNotFound(id));
        };

        if let Some(line) = entry
            .lines()
            .iter()
            .find(|l| !self.accounts.contains_key(&l.account))
        {
            let err = LedgerError::unknown_account(line.account.clone());
            self.pending.insert(id, entry);
            return Err(err);
        }

        let number = self.history.len() as u64 + 1;
        entry.mark_posted(number)?;

        for line in entry.lines() {
            if let Some(account) = self.accounts.get_mut(&line.account) {
                account.append(
                    line.posting_type,
                    line.amount,
                    entry.description().to_string(),
                    entry.date(),
                    Some(id),
                );
            }
        }

        debug!(
            number,
            lines = entry.lines().len(),
            amount = %entry.amount(),
            "Posted journal entry"
        );

        let position = self.history.len();
        self.history_index.insert(id, position);
        self.history.push(entry);
        Ok(&self.history[position])
    }

    /// Validates and posts a set of lines in one step
    ///
    /// # Arguments
    ///
    /// * `lines` - Debit and credit lines; account references may be codes or names
    /// * `description` - Entry description, copied onto each account movement
    /// * `date` - Effective date, today when `None`
    ///
    /// # Errors
    ///
    /// Any validation error; on error nothing is posted or recorded
    pub fn post_transaction(
        &mut self,
        lines: Vec<EntryLine>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<&JournalEntry, LedgerError> {
        let id = self.new_journal_entry(lines, description, date)?;
        self.post_entry(id)
    }

    /// Posts a [`Transaction`] built with the fluent builder
    pub fn post(&mut self, transaction: Transaction) -> Result<&JournalEntry, LedgerError> {
        self.post_transaction(transaction.lines, transaction.description, transaction.date)
    }

    /// Posts the mirror image of a previous entry
    ///
    /// The original entry is left untouched; the correction is a new entry
    /// with every line's side swapped.
    pub fn reverse_entry(
        &mut self,
        id: JournalEntryId,
        date: Option<NaiveDate>,
        reason: &str,
    ) -> Result<&JournalEntry, LedgerError> {
        let original = self.entry(id).ok_or(LedgerError::EntryNotFound(id))?;
        if !original.is_posted() {
            return Err(LedgerError::EntryNotFound(id));
        }

        let description = match original.number() {
            Some(number) => format!("Reversal of #{}: {}", number, reason),
            None => format!("Reversal of {}: {}", id, reason),
        };
        let lines = original
            .lines()
            .iter()
            .map(|l| EntryLine {
                account: l.account.clone(),
                amount: l.amount,
                posting_type: l.posting_type.opposite(),
            })
            .collect();

        self.post_transaction(lines, description, date)
    }

    /// Looks up a posted or pending entry
    pub fn entry(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.history_index
            .get(&id)
            .map(|&i| &self.history[i])
            .or_else(|| self.pending.get(&id))
    }

    /// Posted entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.history.iter().rev()
    }

    /// Posted entries in posting order
    pub fn entries_chronological(&self) -> impl Iterator<Item = &JournalEntry> {
        self.history.iter()
    }

    /// Validated entries that have not been posted
    pub fn pending_entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.pending.values()
    }

    /// Number of posted entries
    pub fn entry_count(&self) -> usize {
        self.history.len()
    }
}
