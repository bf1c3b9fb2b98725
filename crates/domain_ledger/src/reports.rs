//! Financial statements derived from ledger state
//!
//! Every report is a pure read of the accounts. Nothing computed here is
//! stored back on the ledger.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{DateRange, JournalEntryId, Money};

use crate::account::{Account, AccountCategory, AccountEntry, AccountType, NormalBalance};
use crate::ledger::Ledger;

/// One account row of a trial balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub category: AccountCategory,
    pub debit: Money,
    pub credit: Money,
}

/// Trial balance as of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub as_of: Option<NaiveDate>,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: Money,
    pub total_credits: Money,
    pub is_balanced: bool,
}

/// Revenue, expenses and their difference for one section of the income statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncomeSection {
    pub revenue: Money,
    pub expenses: Money,
    pub income: Money,
}

/// Period activity of one revenue or expense account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeLine {
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
    pub amount: Money,
}

/// Income statement over an inclusive period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    pub period: DateRange,
    pub operating: IncomeSection,
    pub other: IncomeSection,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub net_income: Money,
    pub revenue_lines: Vec<IncomeLine>,
    pub expense_lines: Vec<IncomeLine>,
}

/// An account as it appears on the balance sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLine {
    pub code: String,
    pub name: String,
    pub balance: Money,
}

/// Accounts of one category on the balance sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSection {
    pub category: AccountCategory,
    pub lines: Vec<BalanceLine>,
    pub total: Money,
}

/// Balance sheet as of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub as_of: Option<NaiveDate>,
    pub assets: Vec<BalanceSection>,
    pub liabilities: Vec<BalanceSection>,
    pub equity: Vec<BalanceSection>,
    pub total_assets: Money,
    pub total_liabilities: Money,
    /// Equity accounts plus unclosed net income
    pub total_equity: Money,
    /// Net income not yet closed into equity
    pub net_income: Money,
    pub total_liabilities_and_equity: Money,
    pub is_balanced: bool,
}

/// One side entry in a T-account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TAccountEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub entry_id: Option<JournalEntryId>,
}

/// T-account view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub debits: Vec<TAccountEntry>,
    pub credits: Vec<TAccountEntry>,
    pub total_debits: Money,
    pub total_credits: Money,
    pub balance: Money,
}

impl Ledger {
    /// Builds the trial balance
    ///
    /// A normal balance is shown in the account's natural column; an abnormal
    /// one (e.g. accumulated depreciation) is shown as a positive amount in
    /// the opposite column.
    pub fn trial_balance(&self, as_of: Option<NaiveDate>) -> TrialBalance {
        let rows: Vec<TrialBalanceRow> = self
            .accounts()
            .map(|account| {
                let balance = account.balance_as_of(as_of);
                let (natural, opposite) = if balance.is_negative() {
                    (Money::zero(), balance.abs())
                } else {
                    (balance, Money::zero())
                };
                let (debit, credit) = match account.normal_balance() {
                    NormalBalance::Debit => (natural, opposite),
                    NormalBalance::Credit => (opposite, natural),
                };
                TrialBalanceRow {
                    code: account.code().to_string(),
                    name: account.name().to_string(),
                    account_type: account.account_type(),
                    category: account.category().clone(),
                    debit,
                    credit,
                }
            })
            .collect();

        let total_debits: Money = rows.iter().map(|r| r.debit).sum();
        let total_credits: Money = rows.iter().map(|r| r.credit).sum();

        TrialBalance {
            as_of,
            rows,
            total_debits,
            total_credits,
            is_balanced: total_debits == total_credits,
        }
    }

    /// Builds the income statement for an inclusive period
    ///
    /// Each revenue and expense account's activity is computed once, then
    /// split into operating and other sections by category.
    pub fn income_statement(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> IncomeStatement {
        let period_lines = |account_type: AccountType| -> Vec<IncomeLine> {
            self.accounts_by_type(account_type)
                .map(|account| IncomeLine {
                    code: account.code().to_string(),
                    name: account.name().to_string(),
                    category: account.category().clone(),
                    amount: account.activity(start, end),
                })
                .collect()
        };
        let revenue_lines = period_lines(AccountType::Revenue);
        let expense_lines = period_lines(AccountType::Expense);

        let split = |lines: &[IncomeLine]| -> (Money, Money) {
            lines.iter().fold((Money::zero(), Money::zero()), |(operating, other), line| {
                if line.category.is_operating() {
                    (operating + line.amount, other)
                } else {
                    (operating, other + line.amount)
                }
            })
        };
        let (operating_revenue, other_revenue) = split(&revenue_lines);
        let (operating_expenses, other_expenses) = split(&expense_lines);

        let total_revenue = operating_revenue + other_revenue;
        let total_expenses = operating_expenses + other_expenses;

        IncomeStatement {
            period: DateRange {
                start,
                end,
            },
            operating: IncomeSection {
                revenue: operating_revenue,
                expenses: operating_expenses,
                income: operating_revenue - operating_expenses,
            },
            other: IncomeSection {
                revenue: other_revenue,
                expenses: other_expenses,
                income: other_revenue - other_expenses,
            },
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
            revenue_lines,
            expense_lines,
        }
    }

    /// Builds the balance sheet
    ///
    /// Unclosed net income up to `as_of` is added to equity so that the sheet
    /// balances before the books are closed.
    pub fn balance_sheet(&self, as_of: Option<NaiveDate>) -> BalanceSheet {
        let assets = self.sections(AccountType::Asset, as_of);
        let liabilities = self.sections(AccountType::Liability, as_of);
        let equity = self.sections(AccountType::Equity, as_of);

        let total = |sections: &[BalanceSection]| -> Money { sections.iter().map(|s| s.total).sum() };
        let total_assets = total(&assets);
        let total_liabilities = total(&liabilities);

        let net_income = self.income_statement(None, as_of).net_income;
        let total_equity = total(&equity) + net_income;
        let total_liabilities_and_equity = total_liabilities + total_equity;

        BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            net_income,
            total_liabilities_and_equity,
            is_balanced: total_assets == total_liabilities_and_equity,
        }
    }

    /// Groups one account type by category: standard categories first, in
    /// their presentation order, then any custom category in first-seen order
    fn sections(&self, account_type: AccountType, as_of: Option<NaiveDate>) -> Vec<BalanceSection> {
        let mut categories: Vec<AccountCategory> = AccountCategory::standard_for(account_type)
            .iter()
            .map(|&c| AccountCategory::from(c))
            .collect();
        for account in self.accounts_by_type(account_type) {
            if !categories.contains(account.category()) {
                categories.push(account.category().clone());
            }
        }

        categories
            .into_iter()
            .map(|category| {
                let lines: Vec<BalanceLine> = self
                    .accounts_by_type(account_type)
                    .filter(|a| *a.category() == category)
                    .map(|a| BalanceLine {
                        code: a.code().to_string(),
                        name: a.name().to_string(),
                        balance: a.balance_as_of(as_of),
                    })
                    .collect();
                let total = lines.iter().map(|l| l.balance).sum();
                BalanceSection {
                    category,
                    lines,
                    total,
                }
            })
            .collect()
    }

    /// T-account view of every account in code order
    pub fn t_accounts(&self) -> Vec<TAccount> {
        self.accounts().map(t_account).collect()
    }
}

fn t_account(account: &Account) -> TAccount {
    let side = |entries: &[AccountEntry]| -> Vec<TAccountEntry> {
        entries
            .iter()
            .map(|e| TAccountEntry {
                date: e.date,
                description: e.description.clone(),
                amount: e.amount,
                entry_id: e.entry_id,
            })
            .collect()
    };

    TAccount {
        code: account.code().to_string(),
        name: account.name().to_string(),
        account_type: account.account_type(),
        debits: side(account.debits()),
        credits: side(account.credits()),
        total_debits: account.total_debits(),
        total_credits: account.total_credits(),
        balance: account.balance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::codes;
    use crate::journal::Transaction;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn post(ledger: &mut Ledger, on: NaiveDate, debit: &str, credit: &str, amount: rust_decimal::Decimal) {
        ledger
            .post(
                Transaction::new(format!("{} / {}", debit, credit))
                    .dated(on)
                    .debit(debit, Money::new(amount))
                    .credit(credit, Money::new(amount)),
            )
            .unwrap();
    }

    #[test]
    fn test_contra_asset_sits_in_credit_column() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        post(&mut ledger, date(2024, 1, 2), codes::EQUIPMENT, codes::CASH, dec!(1000));
        post(&mut ledger, date(2024, 1, 31), codes::DEPRECIATION_EXPENSE, codes::ACCUMULATED_DEPRECIATION, dec!(50));

        let tb = ledger.trial_balance(None);
        let accumulated = tb.rows.iter().find(|r| r.code == codes::ACCUMULATED_DEPRECIATION).unwrap();
        assert_eq!(accumulated.debit, Money::zero());
        assert_eq!(accumulated.credit.amount(), dec!(50.00));

        let cash = tb.rows.iter().find(|r| r.code == codes::CASH).unwrap();
        assert_eq!(cash.credit.amount(), dec!(1000.00));
        assert!(tb.is_balanced);
    }

    #[test]
    fn test_income_statement_sections() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        post(&mut ledger, date(2024, 1, 5), codes::CASH, codes::SALES_REVENUE, dec!(1000));
        post(&mut ledger, date(2024, 1, 6), codes::CASH, codes::INTEREST_INCOME, dec!(20));
        post(&mut ledger, date(2024, 1, 7), codes::RENT_EXPENSE, codes::CASH, dec!(400));
        post(&mut ledger, date(2024, 1, 8), codes::INTEREST_EXPENSE, codes::CASH, dec!(15));

        let is = ledger.income_statement(None, None);
        assert_eq!(is.operating.revenue.amount(), dec!(1000.00));
        assert_eq!(is.operating.expenses.amount(), dec!(400.00));
        assert_eq!(is.operating.income.amount(), dec!(600.00));
        assert_eq!(is.other.revenue.amount(), dec!(20.00));
        assert_eq!(is.other.expenses.amount(), dec!(15.00));
        assert_eq!(is.net_income.amount(), dec!(605.00));
        assert_eq!(is.revenue_lines.len(), 3);
        assert_eq!(is.expense_lines.len(), 6);
    }

    #[test]
    fn test_income_statement_period_filter() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        post(&mut ledger, date(2024, 1, 5), codes::CASH, codes::SALES_REVENUE, dec!(100));
        post(&mut ledger, date(2024, 2, 5), codes::CASH, codes::SALES_REVENUE, dec!(250));

        let february = ledger.income_statement(Some(date(2024, 2, 1)), Some(date(2024, 2, 29)));
        assert_eq!(february.total_revenue.amount(), dec!(250.00));

        let empty = ledger.income_statement(Some(date(2025, 1, 1)), None);
        assert!(empty.net_income.is_zero());
    }

    #[test]
    fn test_balance_sheet_includes_unclosed_income() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        post(&mut ledger, date(2024, 1, 1), codes::CASH, codes::OWNERS_EQUITY, dec!(5000));
        post(&mut ledger, date(2024, 1, 2), codes::CASH, codes::BANK_LOAN, dec!(2000));
        post(&mut ledger, date(2024, 1, 3), codes::CASH, codes::SERVICE_REVENUE, dec!(700));

        let bs = ledger.balance_sheet(None);
        assert_eq!(bs.total_assets.amount(), dec!(7700.00));
        assert_eq!(bs.total_liabilities.amount(), dec!(2000.00));
        assert_eq!(bs.net_income.amount(), dec!(700.00));
        assert_eq!(bs.total_equity.amount(), dec!(5700.00));
        assert!(bs.is_balanced);

        let names: Vec<_> = bs.assets.iter().map(|s| s.category.to_string()).collect();
        assert_eq!(names, vec!["Current Assets", "Fixed Assets", "Other Assets"]);
    }

    #[test]
    fn test_custom_category_follows_standard_ones() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        ledger
            .create_account("1900", "Deposits Held", AccountType::Asset, "Restricted Assets")
            .unwrap();

        let bs = ledger.balance_sheet(None);
        assert_eq!(bs.assets.last().unwrap().category, "Restricted Assets");
    }

    #[test]
    fn test_t_accounts_mirror_entry_lists() {
        let mut ledger = Ledger::with_standard_chart_on(date(2024, 1, 1));
        post(&mut ledger, date(2024, 1, 2), codes::CASH, codes::OWNERS_EQUITY, dec!(300));
        post(&mut ledger, date(2024, 1, 3), codes::INVENTORY, codes::CASH, dec!(120));

        let views = ledger.t_accounts();
        let cash = views.iter().find(|t| t.code == codes::CASH).unwrap();
        assert_eq!(cash.debits.len(), 1);
        assert_eq!(cash.credits.len(), 1);
        assert_eq!(cash.balance.amount(), dec!(180.00));
        assert_eq!(views.len(), 19);
    }
}
