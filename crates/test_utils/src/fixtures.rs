//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the ledger: amounts, dates, and
//! ledgers already carrying a known set of postings. Fixtures are
//! deterministic so expected balances can be written down in tests.

use chrono::NaiveDate;
use core_kernel::{JournalEntryId, Money};
use domain_ledger::{codes, Ledger, Transaction};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A round amount for simple postings
    pub fn hundred() -> Money {
        Money::new(dec!(100.00))
    }

    /// One cent short of a hundred, for unbalanced-entry tests
    pub fn hundred_less_a_cent() -> Money {
        Money::new(dec!(99.99))
    }

    /// Standard owner investment
    pub fn owner_investment() -> Money {
        Money::new(dec!(10000.00))
    }

    /// Standard equipment cost (5-year life gives 133.33 a month)
    pub fn equipment_cost() -> Money {
        Money::new(dec!(8000.00))
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Opening date of fixture ledgers (Jan 1, 2024)
    pub fn period_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Last day of the fixture month (Jan 31, 2024)
    pub fn month_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    /// Last day of the fixture year (Dec 31, 2024)
    pub fn year_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Shorthand for a 2024 date
    pub fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic journal entry ID for testing
    pub fn entry_id() -> JournalEntryId {
        JournalEntryId::from_uuid(Uuid::parse_str("01890a5d-ac96-774b-bcce-b302099a8057").unwrap())
    }
}

/// Fixture for seeded ledgers
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// The standard chart with no postings, opened on [`DateFixtures::period_start`]
    pub fn standard() -> Ledger {
        Ledger::with_standard_chart_on(DateFixtures::period_start())
    }

    /// One month of trading in January 2024
    ///
    /// | account              | balance  |
    /// |----------------------|----------|
    /// | Cash                 | 4,800.00 |
    /// | Accounts Receivable  | 2,000.00 |
    /// | Inventory            |   500.00 |
    /// | Equipment            | 8,000.00 |
    /// | Accounts Payable     | 3,000.00 |
    /// | Wages Payable        |   800.00 |
    /// | Bank Loan            | 5,000.00 |
    /// | Owner's Equity       | 4,200.00 |
    /// | Sales Revenue        | 6,000.00 |
    /// | Expenses (4 accts)   | 3,700.00 |
    ///
    /// Revenue 6,000.00 less expenses 3,700.00 leaves net income of 2,300.00.
    pub fn trading_month() -> Ledger {
        let mut ledger = Self::standard();
        for transaction in Self::trading_month_transactions() {
            ledger
                .post(transaction)
                .expect("fixture transactions are balanced");
        }
        ledger
    }

    /// The postings behind [`trading_month`](Self::trading_month)
    pub fn trading_month_transactions() -> Vec<Transaction> {
        let d = DateFixtures::day;
        let m = |v| Money::new(v);
        vec![
            Transaction::new("Owner investment")
                .dated(d(1, 1))
                .debit(codes::CASH, m(dec!(4200)))
                .credit(codes::OWNERS_EQUITY, m(dec!(4200))),
            Transaction::new("Bank loan drawn")
                .dated(d(1, 2))
                .debit(codes::CASH, m(dec!(5000)))
                .credit(codes::BANK_LOAN, m(dec!(5000))),
            Transaction::new("Equipment purchase")
                .dated(d(1, 3))
                .debit(codes::EQUIPMENT, m(dec!(8000)))
                .credit(codes::CASH, m(dec!(8000))),
            Transaction::new("Inventory on credit")
                .dated(d(1, 4))
                .debit(codes::INVENTORY, m(dec!(3000)))
                .credit(codes::ACCOUNTS_PAYABLE, m(dec!(3000))),
            Transaction::new("Sales, part on credit")
                .dated(d(1, 15))
                .debit(codes::CASH, m(dec!(4000)))
                .debit(codes::ACCOUNTS_RECEIVABLE, m(dec!(2000)))
                .credit(codes::SALES_REVENUE, m(dec!(6000))),
            Transaction::new("Cost of goods sold")
                .dated(d(1, 15))
                .debit(codes::COST_OF_GOODS_SOLD, m(dec!(2500)))
                .credit(codes::INVENTORY, m(dec!(2500))),
            Transaction::new("Wages accrued")
                .dated(d(1, 31))
                .debit(codes::SALARY_EXPENSE, m(dec!(800)))
                .credit(codes::WAGES_PAYABLE, m(dec!(800))),
            Transaction::new("January rent")
                .dated(d(1, 5))
                .debit(codes::RENT_EXPENSE, m(dec!(300)))
                .credit(codes::CASH, m(dec!(300))),
            Transaction::new("Utilities")
                .dated(d(1, 20))
                .debit(codes::UTILITIES_EXPENSE, m(dec!(100)))
                .credit(codes::CASH, m(dec!(100))),
        ]
    }
}
