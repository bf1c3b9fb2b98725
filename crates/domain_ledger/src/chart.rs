//! Default chart of accounts
//!
//! The ledger is seeded with a small trading-business chart. Names, types
//! and categories are fixed; further accounts can be added with
//! [`Ledger::create_account`](crate::Ledger::create_account).

use chrono::NaiveDate;

use crate::account::{categories, Account, AccountType};

/// Codes of the seeded accounts
pub mod codes {
    pub const CASH: &str = "1000";
    pub const ACCOUNTS_RECEIVABLE: &str = "1100";
    pub const INVENTORY: &str = "1200";
    pub const EQUIPMENT: &str = "1500";
    pub const ACCUMULATED_DEPRECIATION: &str = "1510";

    pub const ACCOUNTS_PAYABLE: &str = "2000";
    pub const WAGES_PAYABLE: &str = "2100";
    pub const BANK_LOAN: &str = "2500";

    pub const OWNERS_EQUITY: &str = "3000";
    pub const RETAINED_EARNINGS: &str = "3100";

    pub const SALES_REVENUE: &str = "4000";
    pub const SERVICE_REVENUE: &str = "4100";
    pub const INTEREST_INCOME: &str = "4200";

    pub const COST_OF_GOODS_SOLD: &str = "5000";
    pub const SALARY_EXPENSE: &str = "5100";
    pub const RENT_EXPENSE: &str = "5200";
    pub const UTILITIES_EXPENSE: &str = "5300";
    pub const DEPRECIATION_EXPENSE: &str = "5400";
    pub const INTEREST_EXPENSE: &str = "5500";
}

/// Static description of a seeded account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSpec {
    pub code: &'static str,
    pub name: &'static str,
    pub account_type: AccountType,
    pub category: &'static str,
}

const fn spec(
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    category: &'static str,
) -> AccountSpec {
    AccountSpec {
        code,
        name,
        account_type,
        category,
    }
}

/// Standard chart of accounts
pub struct ChartOfAccounts;

impl ChartOfAccounts {
    /// The seeded accounts in code order
    pub const STANDARD: &'static [AccountSpec] = &[
        // Assets
        spec(codes::CASH, "Cash", AccountType::Asset, categories::CURRENT_ASSETS),
        spec(codes::ACCOUNTS_RECEIVABLE, "Accounts Receivable", AccountType::Asset, categories::CURRENT_ASSETS),
        spec(codes::INVENTORY, "Inventory", AccountType::Asset, categories::CURRENT_ASSETS),
        spec(codes::EQUIPMENT, "Equipment", AccountType::Asset, categories::FIXED_ASSETS),
        // Contra-asset: typed Asset, carries a credit (negative) balance
        spec(codes::ACCUMULATED_DEPRECIATION, "Accumulated Depreciation", AccountType::Asset, categories::FIXED_ASSETS),

        // Liabilities
        spec(codes::ACCOUNTS_PAYABLE, "Accounts Payable", AccountType::Liability, categories::CURRENT_LIABILITIES),
        spec(codes::WAGES_PAYABLE, "Wages Payable", AccountType::Liability, categories::CURRENT_LIABILITIES),
        spec(codes::BANK_LOAN, "Bank Loan", AccountType::Liability, categories::LONG_TERM_LIABILITIES),

        // Equity
        spec(codes::OWNERS_EQUITY, "Owner's Equity", AccountType::Equity, categories::OWNERS_EQUITY),
        spec(codes::RETAINED_EARNINGS, "Retained Earnings", AccountType::Equity, categories::RETAINED_EARNINGS),

        // Revenue
        spec(codes::SALES_REVENUE, "Sales Revenue", AccountType::Revenue, categories::OPERATING_REVENUE),
        spec(codes::SERVICE_REVENUE, "Service Revenue", AccountType::Revenue, categories::OPERATING_REVENUE),
        spec(codes::INTEREST_INCOME, "Interest Income", AccountType::Revenue, categories::OTHER_REVENUE),

        // Expenses
        spec(codes::COST_OF_GOODS_SOLD, "Cost of Goods Sold", AccountType::Expense, categories::OPERATING_EXPENSES),
        spec(codes::SALARY_EXPENSE, "Salary Expense", AccountType::Expense, categories::OPERATING_EXPENSES),
        spec(codes::RENT_EXPENSE, "Rent Expense", AccountType::Expense, categories::OPERATING_EXPENSES),
        spec(codes::UTILITIES_EXPENSE, "Utilities Expense", AccountType::Expense, categories::OPERATING_EXPENSES),
        spec(codes::DEPRECIATION_EXPENSE, "Depreciation Expense", AccountType::Expense, categories::OPERATING_EXPENSES),
        spec(codes::INTEREST_EXPENSE, "Interest Expense", AccountType::Expense, categories::OTHER_EXPENSES),
    ];

    pub fn standard() -> &'static [AccountSpec] {
        Self::STANDARD
    }

    /// Creates the standard accounts, all opened on `opened_on`
    pub fn standard_accounts(opened_on: NaiveDate) -> Vec<Account> {
        Self::standard()
            .iter()
            .map(|s| Account::new(s.code, s.name, s.account_type, s.category).opened_on(opened_on))
            .collect()
    }
}
