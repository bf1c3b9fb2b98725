//! Money type with fixed minor-unit precision
//!
//! All ledger amounts pass through [`Money`], which holds a `rust_decimal`
//! value rounded to two decimal places. Rounding is half away from zero
//! (0.005 becomes 0.01), the convention used for accounting figures.
//! Untyped input is converted once, at construction or parse time.
//! Deserialized amounts are taken as stored and must already be in cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of minor-unit digits carried by every amount
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,

    /// Amount carrying digits below the minor unit
    #[error("Amount {0} has more than two decimal places")]
    SubMinorUnit(String),
}

/// A monetary amount with exactly two decimal places
///
/// Equality is exact at minor-unit precision, so `Money` can be compared
/// directly when checking that debits equal credits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value, rounding half away from zero to cents
    pub fn new(amount: Decimal) -> Self {
        let mut rounded =
            amount.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MINOR_UNIT_DIGITS);
        Self(rounded)
    }

    /// Creates Money from an amount that is already in cents
    ///
    /// Trailing zeros are accepted (`12.500`), any other digit past the
    /// cents is `SubMinorUnit`.
    pub fn exact(amount: Decimal) -> Result<Self, MoneyError> {
        let money = Self::new(amount);
        if money.0 != amount {
            return Err(MoneyError::SubMinorUnit(amount.to_string()));
        }
        Ok(money)
    }

    /// Creates Money from an integer amount in minor units (cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self::new(Decimal::new(minor_units, MINOR_UNIT_DIGITS))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount in minor units
    pub fn to_minor(&self) -> i128 {
        let mut scaled = self.0;
        scaled.rescale(MINOR_UNIT_DIGITS);
        scaled.mantissa()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition that reports overflow instead of panicking
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction that reports overflow instead of panicking
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a scalar, rounding the result to cents
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }

    /// Divides by a scalar, rounding the result to cents
    ///
    /// Each division rounds independently; callers chaining divisions accept
    /// the accumulated drift.
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.0
            .checked_div(divisor)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::exact(amount).map_err(serde::de::Error::custom)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses an amount such as `1234.5`, `1,234.50` or `-12`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return Err(MoneyError::InvalidAmount(s.to_string()));
        }
        Decimal::from_str(&cleaned)
            .map(Self::new)
            .map_err(|_| MoneyError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a);
            let mb = Money::from_minor(b);
            let mc = Money::from_minor(c);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn display_then_parse_is_lossless(minor in -1_000_000_000i64..1_000_000_000i64) {
            let money = Money::from_minor(minor);
            let parsed: Money = money.to_string().parse().unwrap();
            prop_assert_eq!(parsed, money);
        }
    }
}
