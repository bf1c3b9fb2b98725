//! Comprehensive tests for domain_ledger

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Money, MoneyError};

use domain_ledger::{
    codes, AccountType, DepreciationPolicy, EntryLine, Ledger, LedgerError, SharedLedger,
    Transaction, MAX_LINE_AMOUNT,
};
use test_utils::{
    assert_balance, assert_balance_sheet_balanced, assert_balances_derived, assert_err,
    assert_err_variant, assert_money_eq, assert_money_positive, assert_money_sum_equals,
    assert_money_zero, assert_ok, assert_temporary_accounts_closed, assert_trial_balance_balanced,
    life_years_strategy, positive_money_strategy, sale_strategy, transaction_sequence_strategy,
    DateFixtures, IdFixtures, LedgerFixtures, MoneyFixtures, TestEntryBuilder, TestLedgerBuilder,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Posting Tests
// ============================================================================

mod posting_tests {
    use super::*;

    #[test]
    fn test_one_cent_imbalance_is_rejected() {
        let mut ledger = LedgerFixtures::trading_month();
        let before = ledger.trial_balance(None);

        let err = assert_err!(ledger.post_transaction(
            vec![
                EntryLine::debit(codes::CASH, MoneyFixtures::hundred()),
                EntryLine::credit(codes::SALES_REVENUE, MoneyFixtures::hundred_less_a_cent()),
            ],
            "Off by a cent",
            Some(DateFixtures::month_end()),
        ));

        assert!(err.is_validation());
        assert_eq!(
            err,
            LedgerError::unbalanced(MoneyFixtures::hundred(), MoneyFixtures::hundred_less_a_cent())
        );
        assert_eq!(ledger.trial_balance(None), before);
        assert_eq!(ledger.entry_count(), 9);
    }

    #[test]
    fn test_amounts_beyond_the_line_limit_are_rejected() {
        let mut ledger = LedgerFixtures::trading_month();
        let before = ledger.trial_balance(None);
        let huge = Money::new(rust_decimal::Decimal::MAX / dec!(3));

        let err = assert_err!(ledger.post(
            Transaction::new("Runaway import")
                .dated(DateFixtures::month_end())
                .debit(codes::CASH, huge)
                .debit(codes::CASH, huge)
                .debit(codes::CASH, huge)
                .debit(codes::CASH, huge)
                .credit(codes::SALES_REVENUE, huge),
        ));
        assert_eq!(err, LedgerError::Money(MoneyError::Overflow));

        let over = Money::new(MAX_LINE_AMOUNT + dec!(1));
        assert_err_variant!(
            ledger.post(TestEntryBuilder::simple(codes::CASH, codes::BANK_LOAN, over.amount()).build()),
            LedgerError::Money(MoneyError::Overflow)
        );

        assert_eq!(ledger.trial_balance(None), before);
        assert_eq!(ledger.entry_count(), 9);
        assert_eq!(ledger.pending_entries().count(), 0);
    }

    #[test]
    fn test_unknown_account_is_neither_posted_nor_recorded() {
        let mut ledger = LedgerFixtures::standard();
        let result = ledger.post(TestEntryBuilder::simple("Petty Cash", codes::OWNERS_EQUITY, dec!(50)).build());

        assert_err_variant!(result, LedgerError::UnknownAccount { .. });
        assert_eq!(ledger.entry_count(), 0);
        assert_eq!(ledger.pending_entries().count(), 0);
        assert_balance(&ledger, codes::OWNERS_EQUITY, dec!(0));
    }

    #[test]
    fn test_caller_supplied_id_is_kept() {
        let mut ledger = LedgerFixtures::standard();
        let id = IdFixtures::entry_id();

        assert_ok!(ledger.new_journal_entry_with_id(
            id,
            TestEntryBuilder::simple(codes::CASH, codes::OWNERS_EQUITY, dec!(10)).lines(),
            "Imported entry",
            Some(DateFixtures::period_start()),
        ));
        let posted = assert_ok!(ledger.post_entry(id));
        assert_eq!(posted.id(), id);

        let cash = ledger.account(codes::CASH).unwrap();
        assert_eq!(cash.debits()[0].entry_id, Some(id));
    }

    #[test]
    fn test_reposting_fails_and_changes_nothing() {
        let mut ledger = LedgerFixtures::standard();
        let id = ledger
            .new_journal_entry(
                TestEntryBuilder::simple(codes::CASH, codes::BANK_LOAN, dec!(500)).lines(),
                "Loan",
                None,
            )
            .unwrap();
        ledger.post_entry(id).unwrap();

        assert_err_variant!(ledger.post_entry(id), LedgerError::AlreadyPosted { .. });
        assert_balance(&ledger, codes::BANK_LOAN, dec!(500));
    }

    #[test]
    fn test_unknown_entry_cannot_be_posted() {
        let mut ledger = LedgerFixtures::standard();
        assert_err_variant!(ledger.post_entry(IdFixtures::entry_id()), LedgerError::EntryNotFound(_));
    }

    #[test]
    fn test_multi_line_entry() {
        let ledger = TestLedgerBuilder::new()
            .with_entry(
                TestEntryBuilder::new()
                    .debit(codes::CASH, dec!(600))
                    .debit(codes::ACCOUNTS_RECEIVABLE, dec!(400))
                    .credit(codes::SALES_REVENUE, dec!(700))
                    .credit(codes::SERVICE_REVENUE, dec!(300)),
            )
            .build();

        let entry = ledger.entries().next().unwrap();
        assert_money_eq(entry.debit_total(), dec!(1000));
        assert_money_eq(entry.credit_total(), dec!(1000));
        assert_trial_balance_balanced(&ledger);
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let mut ledger = LedgerFixtures::standard();
        let entry = ledger
            .post(Transaction::new("Undated").debit(codes::CASH, MoneyFixtures::hundred()).credit(codes::OWNERS_EQUITY, MoneyFixtures::hundred()))
            .unwrap();
        assert_eq!(entry.date(), core_kernel::today());
    }

    #[test]
    fn test_created_accounts_take_postings() {
        let mut ledger = LedgerFixtures::standard();
        ledger
            .create_account("4300", "Commission Income", AccountType::Revenue, "Other Revenue")
            .unwrap();
        ledger
            .post(TestEntryBuilder::simple(codes::CASH, "Commission Income", dec!(75)).build())
            .unwrap();

        assert_balance(&ledger, "4300", dec!(75));
        assert_money_eq(ledger.income_statement(None, None).other.revenue, dec!(75));
    }
}

// ============================================================================
// Statement Tests
// ============================================================================

mod statement_tests {
    use super::*;

    #[test]
    fn test_end_bound_keeps_only_earlier_entries() {
        let ledger = TestLedgerBuilder::new()
            .with_posting(date(2024, 1, 1), codes::CASH, codes::OWNERS_EQUITY, dec!(250))
            .with_posting(date(2024, 3, 1), codes::CASH, codes::OWNERS_EQUITY, dec!(100))
            .build();

        let lines: Vec<_> = ledger
            .account(codes::CASH)
            .unwrap()
            .statement(None, Some(date(2024, 2, 1)))
            .collect();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].date, date(2024, 1, 1));
        assert_money_eq(lines[0].balance, dec!(250));
    }

    #[test]
    fn test_credit_normal_running_balance() {
        let ledger = TestLedgerBuilder::new()
            .with_posting(date(2024, 1, 1), codes::CASH, codes::BANK_LOAN, dec!(1000))
            .with_posting(date(2024, 2, 1), codes::BANK_LOAN, codes::CASH, dec!(200))
            .build();

        let balances: Vec<Money> = ledger
            .account(codes::BANK_LOAN)
            .unwrap()
            .statement(None, None)
            .map(|l| l.balance)
            .collect();
        assert_eq!(balances, vec![Money::new(dec!(1000)), Money::new(dec!(800))]);
    }

    #[test]
    fn test_statement_lines_carry_entry_ids() {
        let ledger = LedgerFixtures::trading_month();
        let cash = ledger.account(codes::CASH).unwrap();
        assert!(cash.statement(None, None).all(|line| line.entry_id.is_some()));
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_trading_month_reports() {
        let ledger = LedgerFixtures::trading_month();

        let tb = ledger.trial_balance(None);
        assert!(tb.is_balanced);
        assert_money_eq(tb.total_debits, dec!(19000));

        let income = ledger.income_statement(None, None);
        assert_money_eq(income.net_income, dec!(2300));
        assert_money_eq(income.operating.income, dec!(2300));

        let bs = ledger.balance_sheet(None);
        assert_money_eq(bs.total_assets, dec!(15300));
        assert_money_eq(bs.total_liabilities, dec!(8800));
        assert_money_eq(bs.total_equity, dec!(6500));
        assert!(bs.is_balanced);
    }

    #[test]
    fn test_trial_balance_as_of_excludes_later_entries() {
        let ledger = LedgerFixtures::trading_month();
        let early = ledger.trial_balance(Some(date(2024, 1, 2)));

        assert!(early.is_balanced);
        assert_money_eq(early.total_debits, dec!(9200));
    }

    #[test]
    fn test_balance_sheet_as_of_uses_income_to_date() {
        let ledger = LedgerFixtures::trading_month();
        let mid_month = ledger.balance_sheet(Some(date(2024, 1, 10)));

        assert_money_eq(mid_month.net_income, dec!(-300));
        assert!(mid_month.is_balanced);
    }
}

// ============================================================================
// Closing Tests
// ============================================================================

mod closing_tests {
    use super::*;

    #[test]
    fn test_close_moves_net_income_into_equity() {
        let mut ledger = LedgerFixtures::trading_month();
        let summary = ledger.close_books(Some(DateFixtures::month_end())).unwrap();

        assert_money_eq(summary.total_revenue, dec!(6000));
        assert_money_eq(summary.total_expenses, dec!(3700));
        assert_money_eq(summary.net_income, dec!(2300));
        assert_eq!(summary.entries.len(), 5);

        assert_temporary_accounts_closed(&ledger);
        assert_balance(&ledger, codes::RETAINED_EARNINGS, dec!(2300));
        assert_balance_sheet_balanced(&ledger);
        assert_money_eq(ledger.balance_sheet(None).net_income, dec!(0));
    }

    #[test]
    fn test_second_close_is_a_no_op() {
        let mut ledger = LedgerFixtures::trading_month();
        ledger.close_books(None).unwrap();
        let entries = ledger.entry_count();

        let again = ledger.close_books(None).unwrap();
        assert!(again.entries.is_empty());
        assert_eq!(ledger.entry_count(), entries);
        assert_balance(&ledger, codes::RETAINED_EARNINGS, dec!(2300));
    }
}

// ============================================================================
// Depreciation Tests
// ============================================================================

mod depreciation_tests {
    use super::*;

    #[test]
    fn test_repeated_runs_accumulate() {
        let mut ledger = TestLedgerBuilder::new()
            .with_equipment(date(2024, 1, 2), MoneyFixtures::equipment_cost().amount())
            .build();

        for (i, month_end) in [date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)].into_iter().enumerate() {
            let run = ledger.calculate_depreciation(Some(month_end), 5).unwrap();
            assert_money_eq(run.monthly, dec!(133.33));

            let expected = dec!(133.33) * rust_decimal::Decimal::from(i as u32 + 1);
            assert_balance(&ledger, codes::DEPRECIATION_EXPENSE, expected);
            assert_balance(&ledger, codes::ACCUMULATED_DEPRECIATION, -expected);
        }
        assert_trial_balance_balanced(&ledger);
    }

    #[test]
    fn test_valuation_date_limits_cost() {
        let mut ledger = TestLedgerBuilder::new()
            .with_equipment(date(2024, 1, 2), dec!(6000))
            .with_equipment(date(2024, 6, 1), dec!(6000))
            .build();

        let run = ledger
            .calculate_depreciation_with(&DepreciationPolicy::default(), Some(date(2024, 1, 31)))
            .unwrap();
        assert_money_eq(run.annual, dec!(1200));
        assert_money_eq(run.monthly, dec!(100));
    }

    #[test]
    fn test_invalid_policy_leaves_ledger_untouched() {
        let mut ledger = TestLedgerBuilder::new().with_equipment(date(2024, 1, 2), dec!(1000)).build();
        let policy = DepreciationPolicy::default().months(0);

        assert_err_variant!(
            ledger.calculate_depreciation_with(&policy, None),
            LedgerError::InvalidDepreciationPolicy(_)
        );
        assert_eq!(ledger.entry_count(), 1);
    }
}

// ============================================================================
// Shared Ledger Tests
// ============================================================================

mod shared_tests {
    use super::*;

    #[test]
    fn test_readers_see_whole_entries() {
        let shared = SharedLedger::new(LedgerFixtures::trading_month());
        let closed = shared.write(|ledger| ledger.close_books(None)).unwrap().unwrap();
        assert_money_eq(closed.net_income, dec!(2300));

        let balanced = shared.read(|ledger| ledger.balance_sheet(None).is_balanced).unwrap();
        assert!(balanced);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn posting_balanced_entries_keeps_every_report_balanced(transactions in transaction_sequence_strategy(12)) {
        let mut ledger: Ledger = LedgerFixtures::standard();
        for transaction in transactions {
            let entry = ledger.post(transaction).unwrap();
            prop_assert_eq!(entry.debit_total(), entry.credit_total());
        }

        prop_assert!(ledger.trial_balance(None).is_balanced);
        prop_assert!(ledger.balance_sheet(None).is_balanced);
        assert_balances_derived(&ledger);
    }

    #[test]
    fn sales_add_up_to_revenue_and_net_income(sales in proptest::collection::vec(sale_strategy(), 1..10)) {
        let mut ledger = TestLedgerBuilder::new()
            .with_owner_investment(MoneyFixtures::owner_investment().amount())
            .build();
        let amounts: Vec<Money> = sales.iter().map(|sale| sale.lines[0].amount).collect();
        for sale in sales {
            ledger.post(sale).unwrap();
        }

        let income = ledger.income_statement(None, None);
        assert_money_sum_equals(&amounts, income.total_revenue);
        assert_money_positive(income.net_income);
        assert_money_zero(income.total_expenses);
        assert_balance_sheet_balanced(&ledger);
    }

    #[test]
    fn depreciation_books_both_sides(cost in positive_money_strategy(), life in life_years_strategy()) {
        let mut ledger = TestLedgerBuilder::new()
            .with_equipment(DateFixtures::period_start(), cost.amount())
            .build();

        let run = ledger.calculate_depreciation(Some(DateFixtures::year_end()), life).unwrap();
        prop_assert_eq!(run.amount, run.monthly);
        prop_assert!(run.monthly <= cost);
        prop_assert_eq!(run.entry.is_some(), run.amount.is_positive());

        let expense = ledger.balance(codes::DEPRECIATION_EXPENSE).unwrap();
        let accumulated = ledger.balance(codes::ACCUMULATED_DEPRECIATION).unwrap();
        assert_money_zero(expense + accumulated);
        prop_assert_eq!(expense, run.amount);
        assert_trial_balance_balanced(&ledger);
    }

    #[test]
    fn closing_always_zeroes_temporary_accounts(transactions in transaction_sequence_strategy(8)) {
        let mut ledger = LedgerFixtures::standard();
        for transaction in transactions {
            ledger.post(transaction).unwrap();
        }
        let expected = ledger.income_statement(None, None).net_income;

        let summary = ledger.close_books(None).unwrap();
        prop_assert_eq!(summary.net_income, expected);
        assert_temporary_accounts_closed(&ledger);
        prop_assert!(ledger.balance_sheet(None).is_balanced);
    }
}
