//! Plain-text report rendering
//!
//! Every function returns the full text of one report; amounts are shown as
//! `$1,234.56` or `-$1,234.56`.

use chrono::NaiveDate;
use core_kernel::{DateRange, Money};
use domain_ledger::{
    Account, BalanceSection, BalanceSheet, ClosingSummary, DepreciationRun, IncomeLine,
    IncomeStatement, JournalEntry, PostingType, Statement, TAccount, TrialBalance,
};

const RULE_WIDTH: usize = 76;

/// Formats an amount with a dollar sign and thousands separators
pub fn format_money(money: Money) -> String {
    let sign = if money.is_negative() { "-" } else { "" };
    let text = format!("{:.2}", money.abs().amount());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}${}.{}", sign, grouped, cents)
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn as_of_label(as_of: Option<NaiveDate>) -> String {
    match as_of {
        Some(date) => format!("as of {}", date),
        None => "as of latest posting".to_string(),
    }
}

fn period_label(period: &DateRange) -> String {
    match (period.start, period.end) {
        (Some(start), Some(end)) => format!("{} to {}", start, end),
        (Some(start), None) => format!("from {}", start),
        (None, Some(end)) => format!("through {}", end),
        (None, None) => "all dates".to_string(),
    }
}

/// Blank cell for zero amounts in two-column layouts
fn cell(money: Money) -> String {
    if money.is_zero() {
        String::new()
    } else {
        format_money(money)
    }
}

pub fn trial_balance(tb: &TrialBalance) -> String {
    let mut out = vec![
        format!("Trial Balance {}", as_of_label(tb.as_of)),
        format!("{:<6} {:<30} {:>18} {:>18}", "Code", "Name", "Debit", "Credit"),
        rule(),
    ];
    for row in &tb.rows {
        out.push(format!(
            "{:<6} {:<30} {:>18} {:>18}",
            row.code,
            row.name,
            cell(row.debit),
            cell(row.credit)
        ));
    }
    out.push(rule());
    out.push(format!(
        "{:<37} {:>18} {:>18}",
        "Totals",
        format_money(tb.total_debits),
        format_money(tb.total_credits)
    ));
    if !tb.is_balanced {
        out.push("OUT OF BALANCE".to_string());
    }
    out.join("\n")
}

fn income_lines(out: &mut Vec<String>, lines: &[IncomeLine]) {
    for line in lines.iter().filter(|l| !l.amount.is_zero()) {
        out.push(format!("  {:<6} {:<40} {:>18}", line.code, line.name, format_money(line.amount)));
    }
}

pub fn income_statement(statement: &IncomeStatement) -> String {
    let mut out = vec![
        format!("Income Statement, {}", period_label(&statement.period)),
        rule(),
        "Revenue".to_string(),
    ];
    income_lines(&mut out, &statement.revenue_lines);
    out.push(format!("{:<50} {:>18}", "Total revenue", format_money(statement.total_revenue)));
    out.push(String::new());
    out.push("Expenses".to_string());
    income_lines(&mut out, &statement.expense_lines);
    out.push(format!("{:<50} {:>18}", "Total expenses", format_money(statement.total_expenses)));
    out.push(rule());
    out.push(format!("{:<50} {:>18}", "Operating income", format_money(statement.operating.income)));
    out.push(format!("{:<50} {:>18}", "Other income", format_money(statement.other.income)));
    out.push(format!("{:<50} {:>18}", "Net income", format_money(statement.net_income)));
    out.join("\n")
}

fn balance_sections(out: &mut Vec<String>, title: &str, sections: &[BalanceSection]) {
    out.push(title.to_string());
    for section in sections.iter().filter(|s| !s.lines.is_empty()) {
        out.push(format!("  {}", section.category));
        for line in &section.lines {
            out.push(format!("    {:<6} {:<38} {:>18}", line.code, line.name, format_money(line.balance)));
        }
    }
}

pub fn balance_sheet(sheet: &BalanceSheet) -> String {
    let mut out = vec![format!("Balance Sheet {}", as_of_label(sheet.as_of)), rule()];

    balance_sections(&mut out, "ASSETS", &sheet.assets);
    out.push(format!("{:<50} {:>18}", "Total assets", format_money(sheet.total_assets)));
    out.push(String::new());

    balance_sections(&mut out, "LIABILITIES", &sheet.liabilities);
    out.push(format!("{:<50} {:>18}", "Total liabilities", format_money(sheet.total_liabilities)));
    out.push(String::new());

    balance_sections(&mut out, "EQUITY", &sheet.equity);
    if !sheet.net_income.is_zero() {
        out.push(format!("    {:<45} {:>18}", "Net income (unclosed)", format_money(sheet.net_income)));
    }
    out.push(format!("{:<50} {:>18}", "Total equity", format_money(sheet.total_equity)));
    out.push(rule());
    out.push(format!(
        "{:<50} {:>18}",
        "Total liabilities and equity",
        format_money(sheet.total_liabilities_and_equity)
    ));
    if !sheet.is_balanced {
        out.push("OUT OF BALANCE".to_string());
    }
    out.join("\n")
}

pub fn statement(account: &Account, lines: Statement<'_>) -> String {
    let mut out = vec![
        format!("{} {} ({})", account.code(), account.name(), account.account_type()),
        format!(
            "{:<10} {:<30} {:>15} {:>15} {:>15}",
            "Date", "Description", "Debit", "Credit", "Balance"
        ),
        rule(),
    ];
    let mut closing = Money::zero();
    for line in lines {
        closing = line.balance;
        out.push(format!(
            "{:<10} {:<30} {:>15} {:>15} {:>15}",
            line.date,
            line.description,
            cell(line.debit),
            cell(line.credit),
            format_money(line.balance)
        ));
    }
    out.push(rule());
    out.push(format!("{:<74} {:>15}", "Closing balance", format_money(closing)));
    out.join("\n")
}

pub fn t_accounts(accounts: &[TAccount]) -> String {
    let mut out = Vec::new();
    for t in accounts {
        out.push(format!("{} {} ({})", t.code, t.name, t.account_type));
        out.push("  Debits:".to_string());
        for e in &t.debits {
            out.push(format!("    {:<10} {:<40} {:>15}", e.date, e.description, format_money(e.amount)));
        }
        out.push("  Credits:".to_string());
        for e in &t.credits {
            out.push(format!("    {:<10} {:<40} {:>15}", e.date, e.description, format_money(e.amount)));
        }
        out.push(format!("  Balance: {}", format_money(t.balance)));
        out.push(String::new());
    }
    out.join("\n")
}

pub fn journal<'a>(entries: impl Iterator<Item = &'a JournalEntry>) -> String {
    let mut out = Vec::new();
    for entry in entries {
        let number = entry.number().map(|n| format!("#{}", n)).unwrap_or_default();
        out.push(format!("{:<6} {} {} {}", number, entry.date(), entry.id(), entry.description()));
        for line in entry.lines() {
            let (debit, credit) = match line.posting_type {
                PostingType::Debit => (format_money(line.amount), String::new()),
                PostingType::Credit => (String::new(), format_money(line.amount)),
            };
            out.push(format!("       {:<8} {:>15} {:>15}", line.account, debit, credit));
        }
    }
    if out.is_empty() {
        return "No posted entries".to_string();
    }
    out.join("\n")
}

pub fn accounts<'a>(accounts: impl Iterator<Item = &'a Account>) -> String {
    let mut out = vec![
        format!(
            "{:<6} {:<30} {:<10} {:<24} {:>15}",
            "Code", "Name", "Type", "Category", "Balance"
        ),
        rule(),
    ];
    for account in accounts {
        out.push(format!(
            "{:<6} {:<30} {:<10} {:<24} {:>15}",
            account.code(),
            account.name(),
            account.account_type().to_string(),
            account.category().to_string(),
            format_money(account.balance())
        ));
    }
    out.join("\n")
}

pub fn posted(entry: &JournalEntry) -> String {
    format!(
        "Posted JE #{} {} ({})",
        entry.number().unwrap_or_default(),
        entry.id(),
        format_money(entry.amount())
    )
}

pub fn depreciation(run: &DepreciationRun) -> String {
    match run.entry {
        Some(id) => format!(
            "Depreciation posted {}: annual {}, monthly {}, {} month(s) = {}",
            id,
            format_money(run.annual),
            format_money(run.monthly),
            run.months,
            format_money(run.amount)
        ),
        None => "Nothing to depreciate".to_string(),
    }
}

pub fn closing(summary: &ClosingSummary) -> String {
    format!(
        "Books closed with {} entries. Net income moved to equity: {}",
        summary.entries.len(),
        format_money(summary.net_income)
    )
}
