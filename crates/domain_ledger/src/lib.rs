//! Ledger Domain - Double-Entry Bookkeeping Engine
//!
//! This crate records balanced journal entries against a chart of accounts
//! and derives the financial statements from the resulting account state.
//!
//! # Double-Entry Accounting Principles
//!
//! Every journal entry creates balanced debits and credits:
//! - Debits increase asset/expense accounts
//! - Credits increase liability/equity/revenue accounts
//! - The sum of all debits must equal the sum of all credits
//!
//! # Account Types
//!
//! - **Assets**: Cash, Receivables, Inventory, Equipment
//! - **Liabilities**: Payables, Wages Payable, Bank Loan
//! - **Equity**: Owner's Equity, Retained Earnings
//! - **Revenue**: Sales, Service Revenue, Interest Income
//! - **Expenses**: Cost of Goods Sold, Salaries, Rent, Depreciation
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{codes, Ledger, Transaction};
//!
//! let mut ledger = Ledger::with_standard_chart();
//!
//! // Record an owner investment
//! let transaction = Transaction::new("Owner investment")
//!     .debit(codes::CASH, amount)
//!     .credit(codes::OWNERS_EQUITY, amount);
//!
//! ledger.post(transaction)?;
//! let trial_balance = ledger.trial_balance(None);
//! ```

pub mod account;
pub mod chart;
pub mod closing;
pub mod depreciation;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod reports;
pub mod shared;

pub use account::{
    categories, Account, AccountCategory, AccountEntry, AccountType, NormalBalance, Statement,
    StatementLine,
};
pub use chart::{codes, AccountSpec, ChartOfAccounts};
pub use closing::ClosingSummary;
pub use depreciation::{DepreciationPolicy, DepreciationRun};
pub use error::LedgerError;
pub use journal::{EntryLine, EntryStatus, JournalEntry, PostingType, Transaction, MAX_LINE_AMOUNT};
pub use ledger::Ledger;
pub use reports::{
    BalanceLine, BalanceSection, BalanceSheet, IncomeLine, IncomeSection, IncomeStatement,
    TAccount, TAccountEntry, TrialBalance, TrialBalanceRow,
};
pub use shared::SharedLedger;
