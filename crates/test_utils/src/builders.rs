//! Test Data Builders
//!
//! Provides builder patterns for constructing ledgers and entries with
//! sensible defaults. Tests specify only the postings they care about.

use chrono::NaiveDate;
use core_kernel::Money;
use domain_ledger::{codes, AccountCategory, AccountType, EntryLine, Ledger, Transaction};
use rust_decimal::Decimal;

use crate::fixtures::DateFixtures;

/// Builder for a single balanced or deliberately unbalanced entry
pub struct TestEntryBuilder {
    description: String,
    date: NaiveDate,
    lines: Vec<EntryLine>,
}

impl Default for TestEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEntryBuilder {
    /// Creates a new builder dated [`DateFixtures::period_start`] with no lines
    pub fn new() -> Self {
        Self {
            description: "Test entry".to_string(),
            date: DateFixtures::period_start(),
            lines: Vec::new(),
        }
    }

    /// A two-line entry moving `amount` from `credit` to `debit`
    pub fn simple(debit: &str, credit: &str, amount: Decimal) -> Self {
        Self::new().debit(debit, amount).credit(credit, amount)
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Adds a debit line
    pub fn debit(mut self, account: &str, amount: Decimal) -> Self {
        self.lines.push(EntryLine::debit(account, Money::new(amount)));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account: &str, amount: Decimal) -> Self {
        self.lines.push(EntryLine::credit(account, Money::new(amount)));
        self
    }

    /// Returns the raw lines
    pub fn lines(&self) -> Vec<EntryLine> {
        self.lines.clone()
    }

    /// Builds the transaction
    pub fn build(self) -> Transaction {
        self.lines
            .into_iter()
            .fold(Transaction::new(self.description).dated(self.date), Transaction::line)
    }
}

/// Builder for a ledger seeded with the standard chart
pub struct TestLedgerBuilder {
    opened_on: NaiveDate,
    extra_accounts: Vec<(String, String, AccountType, AccountCategory)>,
    entries: Vec<Transaction>,
}

impl Default for TestLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedgerBuilder {
    /// Creates a new builder with the standard chart and no postings
    pub fn new() -> Self {
        Self {
            opened_on: DateFixtures::period_start(),
            extra_accounts: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Sets the opening date of the seeded accounts
    pub fn opened_on(mut self, date: NaiveDate) -> Self {
        self.opened_on = date;
        self
    }

    /// Adds an account beyond the standard chart
    pub fn with_account(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        category: impl Into<AccountCategory>,
    ) -> Self {
        self.extra_accounts
            .push((code.into(), name.into(), account_type, category.into()));
        self
    }

    /// Queues an entry to post
    pub fn with_entry(mut self, entry: TestEntryBuilder) -> Self {
        self.entries.push(entry.build());
        self
    }

    /// Queues a two-line entry to post
    pub fn with_posting(self, date: NaiveDate, debit: &str, credit: &str, amount: Decimal) -> Self {
        self.with_entry(TestEntryBuilder::simple(debit, credit, amount).on(date))
    }

    /// Queues an owner investment of `amount` in cash
    pub fn with_owner_investment(self, amount: Decimal) -> Self {
        let date = self.opened_on;
        self.with_entry(
            TestEntryBuilder::simple(codes::CASH, codes::OWNERS_EQUITY, amount)
                .with_description("Owner investment")
                .on(date),
        )
    }

    /// Queues a cash purchase of equipment
    pub fn with_equipment(self, date: NaiveDate, cost: Decimal) -> Self {
        self.with_entry(
            TestEntryBuilder::simple(codes::EQUIPMENT, codes::CASH, cost)
                .with_description("Equipment purchase")
                .on(date),
        )
    }

    /// Builds the ledger
    ///
    /// # Panics
    ///
    /// Panics if an extra account clashes or a queued entry is rejected
    pub fn build(self) -> Ledger {
        let mut ledger = Ledger::with_standard_chart_on(self.opened_on);
        for (code, name, account_type, category) in self.extra_accounts {
            if let Err(e) = ledger.create_account(code, name, account_type, category) {
                panic!("Could not create test account: {}", e);
            }
        }
        for entry in self.entries {
            let description = entry.description.clone();
            if let Err(e) = ledger.post(entry) {
                panic!("Could not post test entry '{}': {}", description, e);
            }
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_builder_defaults() {
        let transaction = TestEntryBuilder::simple(codes::CASH, codes::SALES_REVENUE, dec!(25)).build();
        assert_eq!(transaction.date, Some(DateFixtures::period_start()));
        assert_eq!(transaction.lines.len(), 2);
        assert!(transaction.is_balanced());
    }

    #[test]
    fn test_ledger_builder_posts_entries() {
        let ledger = TestLedgerBuilder::new()
            .with_owner_investment(dec!(1000))
            .with_equipment(DateFixtures::day(1, 10), dec!(600))
            .with_account("1300", "Prepaid Insurance", AccountType::Asset, "Current Assets")
            .build();

        assert_eq!(ledger.balance(codes::CASH).unwrap().amount(), dec!(400.00));
        assert_eq!(ledger.entry_count(), 2);
        assert!(ledger.account("1300").is_some());
    }

    #[test]
    #[should_panic(expected = "Could not post test entry")]
    fn test_ledger_builder_panics_on_rejected_entry() {
        TestLedgerBuilder::new()
            .with_entry(TestEntryBuilder::new().debit(codes::CASH, dec!(100)).credit(codes::SALES_REVENUE, dec!(99.99)))
            .build();
    }
}
