//! Custom Test Assertions
//!
//! Provides assertion helpers for ledger types that give more meaningful
//! error messages than comparing raw decimals.

use core_kernel::Money;
use domain_ledger::Ledger;
use rust_decimal::Decimal;

/// Asserts that a Money value equals a decimal amount
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual,
        Money::new(expected),
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: Money) {
    assert!(money.is_positive(), "Expected positive money, got {}", money);
}

/// Asserts that money values sum to a total
pub fn assert_money_sum_equals(parts: &[Money], total: Money) {
    let sum: Money = parts.iter().sum();
    assert_eq!(sum, total, "Sum of parts ({}) doesn't equal total ({})", sum, total);
}

/// Asserts an account's balance in its natural sign
///
/// # Arguments
///
/// * `ledger` - The ledger holding the account
/// * `account` - Account code or name
/// * `expected` - Expected balance
pub fn assert_balance(ledger: &Ledger, account: &str, expected: Decimal) {
    let actual = match ledger.balance(account) {
        Ok(balance) => balance,
        Err(e) => panic!("Cannot read balance of {}: {}", account, e),
    };
    assert_eq!(
        actual,
        Money::new(expected),
        "Balance of {} is {}, expected {}",
        account,
        actual,
        expected
    );
}

/// Asserts that every revenue and expense account is zero
pub fn assert_temporary_accounts_closed(ledger: &Ledger) {
    for account in ledger.accounts().filter(|a| a.account_type().is_temporary()) {
        assert!(
            account.balance().is_zero(),
            "{} {} still carries {}",
            account.code(),
            account.name(),
            account.balance()
        );
    }
}

/// Asserts that both trial balance columns agree
pub fn assert_trial_balance_balanced(ledger: &Ledger) {
    let tb = ledger.trial_balance(None);
    assert!(
        tb.is_balanced,
        "Trial balance out: debits={}, credits={}",
        tb.total_debits,
        tb.total_credits
    );
}

/// Asserts that assets equal liabilities plus equity
pub fn assert_balance_sheet_balanced(ledger: &Ledger) {
    let bs = ledger.balance_sheet(None);
    assert!(
        bs.is_balanced,
        "Balance sheet out: assets={}, liabilities={}, equity={}",
        bs.total_assets,
        bs.total_liabilities,
        bs.total_equity
    );
}

/// Asserts that every account's balance equals its debits less its credits,
/// seen from its normal side
pub fn assert_balances_derived(ledger: &Ledger) {
    for account in ledger.accounts() {
        let expected = account
            .normal_balance()
            .net(account.total_debits(), account.total_credits());
        assert_eq!(account.balance(), expected, "Derived balance mismatch on {}", account.code());
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
