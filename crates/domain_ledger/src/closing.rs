//! Period-end closing of temporary accounts
//!
//! Closing zeroes every revenue and expense account by posting its balance
//! against an equity account, Retained Earnings by default.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use core_kernel::{today, JournalEntryId, Money};

use crate::account::AccountType;
use crate::chart::codes;
use crate::error::LedgerError;
use crate::journal::{EntryLine, PostingType};
use crate::ledger::Ledger;

/// Outcome of a closing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingSummary {
    pub total_revenue: Money,
    pub total_expenses: Money,
    /// Amount moved into equity, `total_revenue - total_expenses`
    pub net_income: Money,
    /// One closing entry per account that carried a balance
    pub entries: Vec<JournalEntryId>,
}

struct ClosingLine {
    code: String,
    name: String,
    /// Side on which the temporary account is posted
    side: PostingType,
    amount: Money,
}

impl Ledger {
    /// Closes revenue and expense accounts into Retained Earnings
    pub fn close_books(&mut self, date: Option<NaiveDate>) -> Result<ClosingSummary, LedgerError> {
        self.close_books_into(codes::RETAINED_EARNINGS, date)
    }

    /// Closes revenue and expense accounts into a chosen equity account
    ///
    /// Accounts with a zero balance are skipped, so a second run on the same
    /// books posts nothing and reports zero net income. An abnormal balance
    /// is closed with the sides swapped. With a `date`, balances are taken as
    /// of that date and later activity stays open.
    ///
    /// # Errors
    ///
    /// - `UnknownAccount` if the target does not exist
    /// - `InvalidClosingAccount` if the target is not an equity account
    pub fn close_books_into(
        &mut self,
        target: &str,
        date: Option<NaiveDate>,
    ) -> Result<ClosingSummary, LedgerError> {
        let equity = self.resolve(target)?;
        if equity.account_type() != AccountType::Equity {
            return Err(LedgerError::InvalidClosingAccount {
                code: equity.code().to_string(),
            });
        }
        let equity_code = equity.code().to_string();
        let as_of = date;
        let date = date.unwrap_or_else(today);

        let mut total_revenue = Money::zero();
        let mut total_expenses = Money::zero();
        let mut plan = Vec::new();

        for account in self.accounts().filter(|a| a.account_type().is_temporary()) {
            // Activity dated after the closing date stays open
            let balance = account.balance_as_of(as_of);
            if balance.is_zero() {
                continue;
            }

            // Posting on the opposite side of the normal balance zeroes it
            let closing_side = match account.account_type() {
                AccountType::Revenue => {
                    total_revenue += balance;
                    PostingType::Debit
                }
                _ => {
                    total_expenses += balance;
                    PostingType::Credit
                }
            };
            let side = if balance.is_negative() {
                closing_side.opposite()
            } else {
                closing_side
            };

            plan.push(ClosingLine {
                code: account.code().to_string(),
                name: account.name().to_string(),
                side,
                amount: balance.abs(),
            });
        }

        let mut entries = Vec::with_capacity(plan.len());
        for line in plan {
            let temporary = EntryLine {
                account: line.code,
                amount: line.amount,
                posting_type: line.side,
            };
            let counterpart = EntryLine {
                account: equity_code.clone(),
                amount: line.amount,
                posting_type: line.side.opposite(),
            };
            let posted = self.post_transaction(
                vec![temporary, counterpart],
                format!("Closing entry: {}", line.name),
                Some(date),
            )?;
            entries.push(posted.id());
        }

        let net_income = total_revenue - total_expenses;
        info!(
            %total_revenue,
            %total_expenses,
            %net_income,
            entries = entries.len(),
            into = %equity_code,
            "Closed books"
        );

        Ok(ClosingSummary {
            total_revenue,
            total_expenses,
            net_income,
            entries,
        })
    }
}
