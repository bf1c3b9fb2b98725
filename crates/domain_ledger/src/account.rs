//! Accounts and their entry lists
//!
//! An [`Account`] keeps two append-only lists, one for debits and one for
//! credits. Nothing else is stored: the balance, totals and statements are
//! all derived from those lists on demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{JournalEntryId, Money};

use crate::error::LedgerError;
use crate::journal::PostingType;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    /// The side on which this type's balance naturally sits
    pub fn normal_balance(&self) -> NormalBalance {
        match self {
            AccountType::Asset | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                NormalBalance::Credit
            }
        }
    }

    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        self.normal_balance() == NormalBalance::Debit
    }

    /// Revenue and expense accounts are zeroed at period close
    pub fn is_temporary(&self) -> bool {
        matches!(self, AccountType::Revenue | AccountType::Expense)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccountType::Asset => "Asset",
            AccountType::Liability => "Liability",
            AccountType::Equity => "Equity",
            AccountType::Revenue => "Revenue",
            AccountType::Expense => "Expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LedgerError::InvalidAccountType(s.to_string()))
    }
}

/// Natural balance polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl NormalBalance {
    /// Net movement of `debits` and `credits` seen from this polarity
    pub fn net(&self, debits: Money, credits: Money) -> Money {
        match self {
            NormalBalance::Debit => debits - credits,
            NormalBalance::Credit => credits - debits,
        }
    }

    /// Signed effect of a single posting on a balance of this polarity
    pub fn effect(&self, posting_type: PostingType, amount: Money) -> Money {
        match (self, posting_type) {
            (NormalBalance::Debit, PostingType::Debit) => amount,
            (NormalBalance::Debit, PostingType::Credit) => -amount,
            (NormalBalance::Credit, PostingType::Debit) => -amount,
            (NormalBalance::Credit, PostingType::Credit) => amount,
        }
    }
}

/// Well-known category labels
pub mod categories {
    pub const CURRENT_ASSETS: &str = "Current Assets";
    pub const FIXED_ASSETS: &str = "Fixed Assets";
    pub const OTHER_ASSETS: &str = "Other Assets";
    pub const CURRENT_LIABILITIES: &str = "Current Liabilities";
    pub const LONG_TERM_LIABILITIES: &str = "Long Term Liabilities";
    pub const OWNERS_EQUITY: &str = "Owner's Equity";
    pub const RETAINED_EARNINGS: &str = "Retained Earnings";
    pub const OPERATING_REVENUE: &str = "Operating Revenue";
    pub const OTHER_REVENUE: &str = "Other Revenue";
    pub const OPERATING_EXPENSES: &str = "Operating Expenses";
    pub const OTHER_EXPENSES: &str = "Other Expenses";
}

/// Free-form classification label used to group accounts on statements
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCategory(String);

impl AccountCategory {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the operating revenue and operating expense categories
    pub fn is_operating(&self) -> bool {
        self.0 == categories::OPERATING_REVENUE || self.0 == categories::OPERATING_EXPENSES
    }

    /// Standard categories for an account type, in presentation order
    pub fn standard_for(account_type: AccountType) -> &'static [&'static str] {
        use categories::*;
        match account_type {
            AccountType::Asset => &[CURRENT_ASSETS, FIXED_ASSETS, OTHER_ASSETS],
            AccountType::Liability => &[CURRENT_LIABILITIES, LONG_TERM_LIABILITIES],
            AccountType::Equity => &[OWNERS_EQUITY, RETAINED_EARNINGS],
            AccountType::Revenue => &[OPERATING_REVENUE, OTHER_REVENUE],
            AccountType::Expense => &[OPERATING_EXPENSES, OTHER_EXPENSES],
        }
    }
}

impl From<&str> for AccountCategory {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for AccountCategory {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl PartialEq<&str> for AccountCategory {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One movement recorded on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Amount, always positive
    pub amount: Money,
    /// Effective date
    pub date: NaiveDate,
    pub description: String,
    /// Journal entry that produced this movement, if any
    pub entry_id: Option<JournalEntryId>,
    /// Account-local sequence across both lists, used to order same-day lines
    pub line: u32,
}

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    code: String,
    name: String,
    account_type: AccountType,
    category: AccountCategory,
    created_on: NaiveDate,
    debits: Vec<AccountEntry>,
    credits: Vec<AccountEntry>,
    /// Line number the next movement receives, one past the highest so far
    #[serde(skip)]
    next_line: u32,
}

impl Account {
    /// Creates a new account with empty entry lists
    ///
    /// # Arguments
    ///
    /// * `code` - Unique account code, used by journal lines
    /// * `name` - Display name
    /// * `account_type` - Type of account, fixes the balance polarity
    /// * `category` - Classification label for statements
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        category: impl Into<AccountCategory>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            category: category.into(),
            created_on: core_kernel::today(),
            debits: Vec::new(),
            credits: Vec::new(),
            next_line: 0,
        }
    }

    /// Sets the creation date
    pub fn opened_on(mut self, date: NaiveDate) -> Self {
        self.created_on = date;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn category(&self) -> &AccountCategory {
        &self.category
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    pub fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }

    pub fn debits(&self) -> &[AccountEntry] {
        &self.debits
    }

    pub fn credits(&self) -> &[AccountEntry] {
        &self.credits
    }

    /// Number of movements recorded on either side
    pub fn entry_count(&self) -> usize {
        self.debits.len() + self.credits.len()
    }

    /// Records a debit movement
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount is zero or negative
    pub fn debit(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        self.append(PostingType::Debit, amount, description.into(), date, None);
        Ok(())
    }

    /// Records a credit movement
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount is zero or negative
    pub fn credit(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        self.append(PostingType::Credit, amount, description.into(), date, None);
        Ok(())
    }

    /// Re-appends a previously recorded movement, keeping its line number
    /// and journal reference. Used when rebuilding an account from storage.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `InconsistentHistory` if the line number leaves no room for another
    pub fn replay(&mut self, posting_type: PostingType, entry: AccountEntry) -> Result<(), LedgerError> {
        ensure_positive(entry.amount)?;
        let following = entry.line.checked_add(1).ok_or_else(|| {
            LedgerError::InconsistentHistory(format!("line {} on account {} is out of range", entry.line, self.code))
        })?;
        self.next_line = self.next_line.max(following);
        match posting_type {
            PostingType::Debit => self.debits.push(entry),
            PostingType::Credit => self.credits.push(entry),
        }
        Ok(())
    }

    /// Appends a validated movement. Callers have already checked the amount.
    pub(crate) fn append(
        &mut self,
        posting_type: PostingType,
        amount: Money,
        description: String,
        date: NaiveDate,
        entry_id: Option<JournalEntryId>,
    ) {
        let entry = AccountEntry {
            amount,
            date,
            description,
            entry_id,
            line: self.next_line,
        };
        self.next_line = self.next_line.saturating_add(1);
        match posting_type {
            PostingType::Debit => self.debits.push(entry),
            PostingType::Credit => self.credits.push(entry),
        }
    }

    pub fn total_debits(&self) -> Money {
        self.debits.iter().map(|e| e.amount).sum()
    }

    pub fn total_credits(&self) -> Money {
        self.credits.iter().map(|e| e.amount).sum()
    }

    /// Debits minus credits, regardless of polarity
    pub fn raw_balance(&self) -> Money {
        self.total_debits() - self.total_credits()
    }

    /// Balance in the account's natural sign
    ///
    /// Positive means a normal balance: a debit balance for assets and
    /// expenses, a credit balance for liabilities, equity and revenue.
    pub fn balance(&self) -> Money {
        self.normal_balance()
            .net(self.total_debits(), self.total_credits())
    }

    /// Balance counting only movements dated on or before `as_of`
    ///
    /// With no date this is the full [`balance`](Self::balance).
    pub fn balance_as_of(&self, as_of: Option<NaiveDate>) -> Money {
        match as_of {
            None => self.balance(),
            Some(date) => self.statement(None, Some(date)).closing_balance(),
        }
    }

    /// Net movement within an inclusive date window, zero when nothing falls
    /// inside it
    pub fn activity(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Money {
        self.statement(start, end).closing_balance()
    }

    /// Date-ordered movements with a running balance
    ///
    /// Lines are filtered by the inclusive bounds and ordered by date, with
    /// same-day lines kept in the order they were recorded. The running
    /// balance starts from zero at the first line shown, so a statement with
    /// a `start` bound does not carry the opening balance and will not
    /// reconcile to [`balance`](Self::balance).
    ///
    /// The returned iterator is lazy and can be cloned to walk it again.
    pub fn statement(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Statement<'_> {
        let in_range = |e: &&AccountEntry| {
            start.map_or(true, |s| e.date >= s) && end.map_or(true, |d| e.date <= d)
        };

        let mut lines: Vec<(PostingType, &AccountEntry)> = self
            .debits
            .iter()
            .filter(in_range)
            .map(|e| (PostingType::Debit, e))
            .chain(
                self.credits
                    .iter()
                    .filter(in_range)
                    .map(|e| (PostingType::Credit, e)),
            )
            .collect();
        lines.sort_by_key(|(_, e)| (e.date, e.line));

        Statement {
            normal: self.normal_balance(),
            lines,
            cursor: 0,
            running: Money::zero(),
        }
    }
}

fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}

/// A single statement line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLine<'a> {
    pub date: NaiveDate,
    pub description: &'a str,
    pub posting_type: PostingType,
    /// Debit amount, zero on credit lines
    pub debit: Money,
    /// Credit amount, zero on debit lines
    pub credit: Money,
    /// Running balance after this line, in the account's natural sign
    pub balance: Money,
    pub entry_id: Option<JournalEntryId>,
}

/// Iterator over an account statement
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    normal: NormalBalance,
    lines: Vec<(PostingType, &'a AccountEntry)>,
    cursor: usize,
    running: Money,
}

impl<'a> Statement<'a> {
    /// Rewinds to the first line with a zero running balance
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.running = Money::zero();
    }

    /// Running balance after the last line, or zero for an empty statement
    pub fn closing_balance(self) -> Money {
        self.last().map(|line| line.balance).unwrap_or_default()
    }
}

impl<'a> Iterator for Statement<'a> {
    type Item = StatementLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (posting_type, entry) = *self.lines.get(self.cursor)?;
        self.cursor += 1;
        self.running += self.normal.effect(posting_type, entry.amount);

        let (debit, credit) = match posting_type {
            PostingType::Debit => (entry.amount, Money::zero()),
            PostingType::Credit => (Money::zero(), entry.amount),
        };

        Some(StatementLine {
            date: entry.date,
            description: &entry.description,
            posting_type,
            debit,
            credit,
            balance: self.running,
            entry_id: entry.entry_id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Statement<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash() -> Account {
        Account::new("1000", "Cash", AccountType::Asset, categories::CURRENT_ASSETS)
    }

    #[test]
    fn test_account_type_is_debit_normal() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!("revenue".parse::<AccountType>().unwrap(), AccountType::Revenue);
        assert!(matches!(
            "Income".parse::<AccountType>(),
            Err(LedgerError::InvalidAccountType(_))
        ));
    }

    #[test]
    fn test_balance_follows_polarity() {
        let mut asset = cash();
        asset.debit(Money::new(dec!(100)), "in", date(2024, 1, 1)).unwrap();
        asset.credit(Money::new(dec!(30)), "out", date(2024, 1, 2)).unwrap();
        assert_eq!(asset.balance().amount(), dec!(70.00));
        assert_eq!(asset.raw_balance().amount(), dec!(70.00));

        let mut loan = Account::new("2500", "Bank Loan", AccountType::Liability, categories::LONG_TERM_LIABILITIES);
        loan.credit(Money::new(dec!(500)), "draw", date(2024, 1, 1)).unwrap();
        loan.debit(Money::new(dec!(200)), "repay", date(2024, 2, 1)).unwrap();
        assert_eq!(loan.balance().amount(), dec!(300.00));
        assert_eq!(loan.raw_balance().amount(), dec!(-300.00));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let mut account = cash();
        let zero = account.debit(Money::zero(), "nothing", date(2024, 1, 1));
        let negative = account.credit(Money::new(dec!(-5)), "negative", date(2024, 1, 1));

        assert!(matches!(zero, Err(LedgerError::InvalidAmount { .. })));
        assert!(matches!(negative, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(account.entry_count(), 0);
    }

    #[test]
    fn test_statement_orders_by_date_then_insertion() {
        let mut account = cash();
        account.debit(Money::new(dec!(50)), "late", date(2024, 3, 1)).unwrap();
        account.credit(Money::new(dec!(10)), "same day first", date(2024, 1, 1)).unwrap();
        account.debit(Money::new(dec!(40)), "same day second", date(2024, 1, 1)).unwrap();

        let descriptions: Vec<&str> = account.statement(None, None).map(|l| l.description).collect();
        assert_eq!(descriptions, vec!["same day first", "same day second", "late"]);

        let balances: Vec<Money> = account.statement(None, None).map(|l| l.balance).collect();
        assert_eq!(
            balances,
            vec![Money::new(dec!(-10)), Money::new(dec!(30)), Money::new(dec!(80))]
        );
    }

    #[test]
    fn test_statement_end_bound_reconciles() {
        let mut account = cash();
        account.debit(Money::new(dec!(100)), "jan", date(2024, 1, 1)).unwrap();
        account.debit(Money::new(dec!(200)), "mar", date(2024, 3, 1)).unwrap();

        let lines: Vec<_> = account.statement(None, Some(date(2024, 2, 1))).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].balance.amount(), dec!(100.00));
        assert_eq!(account.balance_as_of(Some(date(2024, 2, 1))).amount(), dec!(100.00));
        assert_eq!(account.balance_as_of(None).amount(), dec!(300.00));
    }

    #[test]
    fn test_statement_start_bound_starts_from_zero() {
        let mut account = cash();
        account.debit(Money::new(dec!(100)), "jan", date(2024, 1, 1)).unwrap();
        account.debit(Money::new(dec!(200)), "mar", date(2024, 3, 1)).unwrap();

        assert_eq!(account.activity(Some(date(2024, 2, 1)), None).amount(), dec!(200.00));
        assert_ne!(account.activity(Some(date(2024, 2, 1)), None), account.balance());
    }

    #[test]
    fn test_statement_is_restartable() {
        let mut account = cash();
        account.debit(Money::new(dec!(5)), "a", date(2024, 1, 1)).unwrap();
        account.debit(Money::new(dec!(7)), "b", date(2024, 1, 2)).unwrap();

        let mut statement = account.statement(None, None);
        assert_eq!(statement.len(), 2);
        let first_pass: Vec<_> = statement.by_ref().collect();
        assert_eq!(statement.next(), None);

        statement.restart();
        let second_pass: Vec<_> = statement.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_empty_range_is_zero() {
        let mut account = cash();
        account.debit(Money::new(dec!(5)), "a", date(2024, 5, 1)).unwrap();
        assert!(account.activity(Some(date(2025, 1, 1)), None).is_zero());
        assert!(account.balance_as_of(Some(date(2024, 1, 1))).is_zero());
    }

    #[test]
    fn test_replay_keeps_line_numbers() {
        let mut original = cash();
        original.debit(Money::new(dec!(1)), "a", date(2024, 1, 1)).unwrap();
        original.credit(Money::new(dec!(2)), "b", date(2024, 1, 1)).unwrap();

        let mut rebuilt = cash();
        for entry in original.debits() {
            rebuilt.replay(PostingType::Debit, entry.clone()).unwrap();
        }
        for entry in original.credits() {
            rebuilt.replay(PostingType::Credit, entry.clone()).unwrap();
        }

        let before: Vec<_> = original.statement(None, None).collect();
        let after: Vec<_> = rebuilt.statement(None, None).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_lines_continue_after_replayed_history() {
        let mut account = cash();
        let replayed = AccountEntry {
            amount: Money::new(dec!(10)),
            date: date(2024, 1, 1),
            description: "imported".to_string(),
            entry_id: None,
            line: 41,
        };
        account.replay(PostingType::Credit, replayed.clone()).unwrap();
        account
            .replay(PostingType::Debit, AccountEntry { line: 7, ..replayed.clone() })
            .unwrap();

        account.debit(Money::new(dec!(1)), "next", date(2024, 1, 1)).unwrap();
        account.credit(Money::new(dec!(1)), "after", date(2024, 1, 1)).unwrap();
        assert_eq!(account.debits()[1].line, 42);
        assert_eq!(account.credits()[1].line, 43);

        let out_of_range = account.replay(PostingType::Debit, AccountEntry { line: u32::MAX, ..replayed });
        assert!(matches!(out_of_range, Err(LedgerError::InconsistentHistory(_))));
        assert_eq!(account.entry_count(), 4);
    }

    #[test]
    fn test_long_history_keeps_unique_increasing_lines() {
        let mut account = cash();
        for day in 0..2_000u32 {
            let on = date(2024, 1, 1) + chrono::Duration::days(i64::from(day % 365));
            if day % 2 == 0 {
                account.debit(Money::new(dec!(5)), "in", on).unwrap();
            } else {
                account.credit(Money::new(dec!(3)), "out", on).unwrap();
            }
        }

        let mut lines: Vec<u32> = account.debits().iter().chain(account.credits()).map(|e| e.line).collect();
        lines.sort_unstable();
        assert_eq!(lines, (0..2_000).collect::<Vec<u32>>());
        assert_eq!(account.balance().amount(), dec!(2000.00));
    }

    #[test]
    fn test_category_helpers() {
        let category = AccountCategory::from(categories::OPERATING_EXPENSES);
        assert!(category.is_operating());
        assert!(category == categories::OPERATING_EXPENSES);
        assert!(!AccountCategory::from("Special Items").is_operating());
        assert_eq!(AccountCategory::standard_for(AccountType::Liability).len(), 2);
    }
}
