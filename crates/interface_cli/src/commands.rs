//! Command execution against a loaded ledger

use chrono::NaiveDate;
use core_kernel::{today, DateRange, Money};
use domain_ledger::{codes, DepreciationPolicy, EntryLine, Ledger, Transaction};
use rust_decimal::Decimal;
use tracing::info;

use crate::args::{Command, LineArg};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;

/// Runs one command and returns the text to print
///
/// The ledger is changed in place; saving is left to the caller.
pub fn execute(command: &Command, config: &CliConfig, ledger: &mut Ledger) -> Result<String, CliError> {
    match command {
        Command::Post {
            description,
            date,
            debits,
            credits,
        } => {
            let lines = to_lines(debits, |account, amount| EntryLine::debit(account, amount))
                .chain(to_lines(credits, |account, amount| EntryLine::credit(account, amount)))
                .collect();
            let entry = ledger.post_transaction(lines, description.clone(), *date)?;
            Ok(render::posted(entry))
        }
        Command::Reverse { id, reason, date } => {
            let entry = ledger.reverse_entry(*id, *date, reason)?;
            Ok(render::posted(entry))
        }
        Command::TrialBalance { as_of } => Ok(render::trial_balance(&ledger.trial_balance(*as_of))),
        Command::IncomeStatement { from, to } => {
            let period = period(*from, *to)?;
            Ok(render::income_statement(&ledger.income_statement(period.start, period.end)))
        }
        Command::BalanceSheet { as_of } => Ok(render::balance_sheet(&ledger.balance_sheet(*as_of))),
        Command::Statement { account, from, to } => {
            let period = period(*from, *to)?;
            let account = ledger.resolve(account)?;
            Ok(render::statement(account, account.statement(period.start, period.end)))
        }
        Command::TAccounts => Ok(render::t_accounts(&ledger.t_accounts())),
        Command::Journal { limit } => Ok(render::journal(
            ledger.entries().take(limit.unwrap_or(usize::MAX)),
        )),
        Command::Accounts => Ok(render::accounts(ledger.accounts())),
        Command::Depreciate {
            as_of,
            life_years,
            months,
            salvage,
        } => {
            let mut policy = DepreciationPolicy::with_life_years(
                life_years.unwrap_or(config.depreciation_life_years),
            )
            .months(*months);
            if let Some(salvage) = salvage {
                policy = policy.salvage_value(*salvage);
            }
            let run = ledger.calculate_depreciation_with(&policy, *as_of)?;
            Ok(render::depreciation(&run))
        }
        Command::Close { date, into } => {
            let summary = match into {
                Some(target) => ledger.close_books_into(target, *date)?,
                None => ledger.close_books(*date)?,
            };
            Ok(render::closing(&summary))
        }
        Command::Demo { date } => {
            *ledger = demo_ledger(date.unwrap_or_else(today), config.depreciation_life_years)?;
            Ok(format!(
                "Demo posted with {} entries. Run reports to see results.",
                ledger.entry_count()
            ))
        }
    }
}

fn to_lines<'a>(
    lines: &'a [LineArg],
    side: fn(String, Money) -> EntryLine,
) -> impl Iterator<Item = EntryLine> + 'a {
    lines.iter().map(move |l| side(l.account.clone(), l.amount))
}

fn period(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<DateRange, CliError> {
    DateRange::new(from, to).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// A fresh set of books with a small trading scenario and a year of
/// depreciation on the equipment
fn demo_ledger(date: NaiveDate, life_years: u32) -> Result<Ledger, CliError> {
    let mut ledger = Ledger::with_standard_chart_on(date);
    let amount = |value: i64| Money::new(Decimal::from(value));

    let scenario = [
        ("Owner invests capital", codes::CASH, codes::OWNERS_EQUITY, 20_000),
        ("Buy equipment with cash", codes::EQUIPMENT, codes::CASH, 8_000),
        ("Buy inventory on credit", codes::INVENTORY, codes::ACCOUNTS_PAYABLE, 4_000),
        ("Take bank loan", codes::CASH, codes::BANK_LOAN, 5_000),
        ("Accrue wages", codes::SALARY_EXPENSE, codes::WAGES_PAYABLE, 1_200),
        ("Sale on credit", codes::ACCOUNTS_RECEIVABLE, codes::SALES_REVENUE, 6_000),
        ("Record COGS", codes::COST_OF_GOODS_SOLD, codes::INVENTORY, 2_500),
    ];
    for (description, debit, credit, value) in scenario {
        ledger.post(
            Transaction::new(description)
                .dated(date)
                .debit(debit, amount(value))
                .credit(credit, amount(value)),
        )?;
    }

    let policy = DepreciationPolicy::with_life_years(life_years).months(12);
    ledger.calculate_depreciation_with(&policy, Some(date))?;

    info!(entries = ledger.entry_count(), "Demo scenario posted");
    Ok(ledger)
}
