//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledger data that
//! keeps the double-entry invariants: generated entries are balanced and
//! only reference accounts of the standard chart.

use chrono::{Duration, NaiveDate};
use core_kernel::Money;
use domain_ledger::{codes, ChartOfAccounts, EntryLine, Transaction};
use proptest::prelude::*;

/// Strategy for generating positive Money values, one cent to ten million
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..1_000_000_000i64).prop_map(Money::from_minor)
}

/// Strategy for picking any account code of the standard chart
pub fn account_code_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(ChartOfAccounts::standard().to_vec()).prop_map(|s| s.code.to_string())
}

/// Strategy for generating dates within 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..366i64).prop_map(|days| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(days))
}

/// Strategy for generating balanced entry lines
///
/// Produces one to four debit lines and one to three credit lines. The
/// credit side splits the debit total so both sides match to the cent.
pub fn balanced_lines_strategy() -> impl Strategy<Value = Vec<EntryLine>> {
    (
        proptest::collection::vec((account_code_strategy(), 100i64..10_000_000i64), 1..=4),
        proptest::collection::vec(account_code_strategy(), 1..=3),
    )
        .prop_map(|(debits, credit_accounts)| {
            let total: i64 = debits.iter().map(|(_, amount)| amount).sum();
            let count = credit_accounts.len() as i64;
            let share = total / count;

            let mut lines: Vec<EntryLine> = debits
                .into_iter()
                .map(|(account, amount)| EntryLine::debit(account, Money::from_minor(amount)))
                .collect();
            for (i, account) in credit_accounts.into_iter().enumerate() {
                let amount = if i as i64 == count - 1 {
                    total - share * (count - 1)
                } else {
                    share
                };
                lines.push(EntryLine::credit(account, Money::from_minor(amount)));
            }
            lines
        })
}

/// Strategy for generating balanced, dated transactions
pub fn balanced_transaction_strategy() -> impl Strategy<Value = Transaction> {
    (balanced_lines_strategy(), date_2024_strategy(), "[A-Za-z ]{3,20}").prop_map(
        |(lines, date, description)| {
            lines
                .into_iter()
                .fold(Transaction::new(description).dated(date), Transaction::line)
        },
    )
}

/// Strategy for generating a sequence of balanced transactions
pub fn transaction_sequence_strategy(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    proptest::collection::vec(balanced_transaction_strategy(), 1..=max)
}

/// Strategy for generating a simple sale: cash or receivable against revenue
pub fn sale_strategy() -> impl Strategy<Value = Transaction> {
    (
        prop_oneof![Just(codes::CASH), Just(codes::ACCOUNTS_RECEIVABLE)],
        prop_oneof![Just(codes::SALES_REVENUE), Just(codes::SERVICE_REVENUE)],
        1i64..1_000_000i64,
        date_2024_strategy(),
    )
        .prop_map(|(debit, credit, minor, date)| {
            Transaction::new("Generated sale")
                .dated(date)
                .debit(debit, Money::from_minor(minor))
                .credit(credit, Money::from_minor(minor))
        })
}

/// Strategy for generating useful lives for depreciation (1 to 40 years)
pub fn life_years_strategy() -> impl Strategy<Value = u32> {
    1u32..41u32
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_money_is_always_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }

        #[test]
        fn generated_lines_are_balanced(lines in balanced_lines_strategy()) {
            let debits: Money = lines.iter().filter(|l| l.is_debit()).map(|l| l.amount).sum();
            let credits: Money = lines.iter().filter(|l| !l.is_debit()).map(|l| l.amount).sum();
            prop_assert_eq!(debits, credits);
            prop_assert!(lines.iter().all(|l| l.amount.is_positive()));
        }

        #[test]
        fn generated_dates_stay_in_2024(date in date_2024_strategy()) {
            prop_assert_eq!(chrono::Datelike::year(&date), 2024);
        }
    }
}
