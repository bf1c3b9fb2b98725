//! Journal entries and their lines
//!
//! This module defines the structure of balanced journal entries in the
//! double-entry ledger. An entry is validated when it is built, and posted
//! at most once by the [`Ledger`](crate::Ledger).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{JournalEntryId, Money, MoneyError};
use rust_decimal::Decimal;

use crate::error::LedgerError;

/// Type of posting (debit or credit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostingType {
    /// Debit posting
    Debit,
    /// Credit posting
    Credit,
}

impl PostingType {
    pub fn opposite(&self) -> Self {
        match self {
            PostingType::Debit => PostingType::Credit,
            PostingType::Credit => PostingType::Debit,
        }
    }
}

/// A single line of a journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Account code (or name, before the ledger resolves it)
    pub account: String,
    /// Amount (always positive)
    pub amount: Money,
    /// Debit or credit
    pub posting_type: PostingType,
}

impl EntryLine {
    /// Creates a new debit line
    ///
    /// # Arguments
    ///
    /// * `account` - Account to debit
    /// * `amount` - Amount to debit
    pub fn debit(account: impl Into<String>, amount: Money) -> Self {
        Self {
            account: account.into(),
            amount,
            posting_type: PostingType::Debit,
        }
    }

    /// Creates a new credit line
    ///
    /// # Arguments
    ///
    /// * `account` - Account to credit
    /// * `amount` - Amount to credit
    pub fn credit(account: impl Into<String>, amount: Money) -> Self {
        Self {
            account: account.into(),
            amount,
            posting_type: PostingType::Credit,
        }
    }

    pub fn is_debit(&self) -> bool {
        self.posting_type == PostingType::Debit
    }
}

/// Lifecycle of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Built and validated, not yet applied to any account
    Validated,
    /// Applied to the accounts; terminal
    Posted {
        /// Sequential display number, starting at 1
        number: u64,
        posted_at: DateTime<Utc>,
    },
}

/// A balanced journal entry
///
/// # Invariants
///
/// - At least one debit line and one credit line
/// - Every line amount is greater than zero
/// - Total debits equal total credits exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    id: JournalEntryId,
    date: NaiveDate,
    description: String,
    lines: Vec<EntryLine>,
    status: EntryStatus,
}

impl JournalEntry {
    /// Builds and validates a new, unposted entry
    ///
    /// # Errors
    ///
    /// - `EmptyEntry` if there are no lines, or no debit or no credit line
    /// - `InvalidAmount` if any line amount is not positive
    /// - `UnbalancedEntry` if debits and credits differ
    pub fn new(
        id: JournalEntryId,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<EntryLine>,
    ) -> Result<Self, LedgerError> {
        validate_lines(&lines)?;
        Ok(Self {
            id,
            date,
            description: description.into(),
            lines,
            status: EntryStatus::Validated,
        })
    }

    /// Rebuilds an entry that was already posted, e.g. from storage
    pub fn from_history(
        id: JournalEntryId,
        number: u64,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<EntryLine>,
        posted_at: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let mut entry = Self::new(id, date, description, lines)?;
        entry.status = EntryStatus::Posted { number, posted_at };
        Ok(entry)
    }

    pub fn id(&self) -> JournalEntryId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn lines(&self) -> &[EntryLine] {
        &self.lines
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn is_posted(&self) -> bool {
        matches!(self.status, EntryStatus::Posted { .. })
    }

    /// Display number, assigned when the entry is posted
    pub fn number(&self) -> Option<u64> {
        match self.status {
            EntryStatus::Posted { number, .. } => Some(number),
            EntryStatus::Validated => None,
        }
    }

    pub fn debit_total(&self) -> Money {
        side_total(&self.lines, PostingType::Debit)
    }

    pub fn credit_total(&self) -> Money {
        side_total(&self.lines, PostingType::Credit)
    }

    /// Entry amount, equal to either side's total
    pub fn amount(&self) -> Money {
        self.debit_total()
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [EntryLine] {
        &mut self.lines
    }

    pub(crate) fn mark_posted(&mut self, number: u64) -> Result<(), LedgerError> {
        if self.is_posted() {
            return Err(LedgerError::AlreadyPosted { id: self.id });
        }
        self.status = EntryStatus::Posted {
            number,
            posted_at: Utc::now(),
        };
        Ok(())
    }
}

/// Largest amount a single line may carry
///
/// Keeps account balances and report totals far from the decimal range.
pub const MAX_LINE_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

// Only called on validated lines, whose totals are known to fit
fn side_total(lines: &[EntryLine], posting_type: PostingType) -> Money {
    lines
        .iter()
        .filter(|l| l.posting_type == posting_type)
        .map(|l| l.amount)
        .sum()
}

fn checked_side_total(lines: &[EntryLine], posting_type: PostingType) -> Result<Money, MoneyError> {
    lines
        .iter()
        .filter(|l| l.posting_type == posting_type)
        .try_fold(Money::zero(), |total, l| total.checked_add(&l.amount))
}

fn validate_lines(lines: &[EntryLine]) -> Result<(), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::EmptyEntry);
    }

    if let Some(line) = lines.iter().find(|l| !l.amount.is_positive()) {
        return Err(LedgerError::InvalidAmount {
            amount: line.amount,
        });
    }

    if lines.iter().any(|l| l.amount.amount() > MAX_LINE_AMOUNT) {
        return Err(MoneyError::Overflow.into());
    }

    let has_debit = lines.iter().any(EntryLine::is_debit);
    let has_credit = lines.iter().any(|l| !l.is_debit());
    if !has_debit || !has_credit {
        return Err(LedgerError::EmptyEntry);
    }

    let debit_total = checked_side_total(lines, PostingType::Debit)?;
    let credit_total = checked_side_total(lines, PostingType::Credit)?;
    if debit_total != credit_total {
        return Err(LedgerError::unbalanced(debit_total, credit_total));
    }

    Ok(())
}

/// Builder for a journal entry awaiting posting
///
/// ```rust,ignore
/// let transaction = Transaction::new("Owner investment")
///     .dated(date)
///     .debit(codes::CASH, amount)
///     .credit(codes::OWNERS_EQUITY, amount);
///
/// ledger.post(transaction)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    /// Effective date, today when unset
    pub date: Option<NaiveDate>,
    pub lines: Vec<EntryLine>,
}

impl Transaction {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            date: None,
            lines: Vec::new(),
        }
    }

    /// Sets the transaction date
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Adds a debit line
    pub fn debit(mut self, account: impl Into<String>, amount: Money) -> Self {
        self.lines.push(EntryLine::debit(account, amount));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account: impl Into<String>, amount: Money) -> Self {
        self.lines.push(EntryLine::credit(account, amount));
        self
    }

    /// Adds a prepared line
    pub fn line(mut self, line: EntryLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Checks if the transaction is balanced
    pub fn is_balanced(&self) -> bool {
        match (
            checked_side_total(&self.lines, PostingType::Debit),
            checked_side_total(&self.lines, PostingType::Credit),
        ) {
            (Ok(debits), Ok(credits)) => debits == credits,
            _ => false,
        }
    }
}
