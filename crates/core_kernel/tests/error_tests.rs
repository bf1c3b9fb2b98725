//! Tests for core_kernel error types

use chrono::NaiveDate;
use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::InvalidAmount("abc".to_string());
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
    assert_eq!(core_error.to_string(), "Money error: Invalid amount: abc");
}

#[test]
fn test_core_error_from_temporal_error() {
    let temporal_error = TemporalError::InvalidRange {
        start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    let core_error: CoreError = temporal_error.into();

    assert!(matches!(core_error, CoreError::Temporal(_)));
    assert!(core_error.to_string().contains("2024-03-01"));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}
