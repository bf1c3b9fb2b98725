//! Straight-line depreciation
//!
//! A depreciation run reads the asset's cost, derives an annual and a
//! monthly charge, and posts one entry moving the charge from the
//! accumulated depreciation account into expense.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{today, JournalEntryId, Money};

use crate::chart::codes;
use crate::error::LedgerError;
use crate::journal::EntryLine;
use crate::ledger::Ledger;

const MONTHS_PER_YEAR: u32 = 12;

/// Parameters of a straight-line depreciation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationPolicy {
    /// Useful life of the asset in years
    pub life_years: u32,
    /// Residual value excluded from the depreciable base
    pub salvage_value: Money,
    /// Number of monthly charges to post in one run
    pub months: u32,
    /// Account carrying the asset's cost
    pub asset_account: String,
    /// Contra-asset credited with the charge
    pub accumulated_account: String,
    /// Expense account debited with the charge
    pub expense_account: String,
}

impl Default for DepreciationPolicy {
    fn default() -> Self {
        Self {
            life_years: 5,
            salvage_value: Money::zero(),
            months: 1,
            asset_account: codes::EQUIPMENT.to_string(),
            accumulated_account: codes::ACCUMULATED_DEPRECIATION.to_string(),
            expense_account: codes::DEPRECIATION_EXPENSE.to_string(),
        }
    }
}

impl DepreciationPolicy {
    /// Default policy with a different useful life
    pub fn with_life_years(life_years: u32) -> Self {
        Self {
            life_years,
            ..Self::default()
        }
    }

    pub fn months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    pub fn salvage_value(mut self, salvage_value: Money) -> Self {
        self.salvage_value = salvage_value;
        self
    }

    fn validate(&self) -> Result<(), LedgerError> {
        if self.life_years == 0 {
            return Err(LedgerError::InvalidDepreciationPolicy(
                "useful life must be at least one year".to_string(),
            ));
        }
        if self.months == 0 {
            return Err(LedgerError::InvalidDepreciationPolicy(
                "at least one month must be depreciated".to_string(),
            ));
        }
        if self.salvage_value.is_negative() {
            return Err(LedgerError::InvalidDepreciationPolicy(format!(
                "salvage value cannot be negative: {}",
                self.salvage_value
            )));
        }
        Ok(())
    }
}

/// Outcome of a depreciation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepreciationRun {
    pub annual: Money,
    pub monthly: Money,
    pub months: u32,
    /// Amount posted, `monthly * months`
    pub amount: Money,
    /// Posted entry, None when there was nothing to depreciate
    pub entry: Option<JournalEntryId>,
}

impl Ledger {
    /// Posts one month of straight-line depreciation on Equipment
    ///
    /// # Arguments
    ///
    /// * `as_of` - Valuation and posting date, today when `None`
    /// * `life_years` - Useful life of the equipment
    pub fn calculate_depreciation(
        &mut self,
        as_of: Option<NaiveDate>,
        life_years: u32,
    ) -> Result<DepreciationRun, LedgerError> {
        self.calculate_depreciation_with(&DepreciationPolicy::with_life_years(life_years), as_of)
    }

    /// Posts straight-line depreciation under an explicit policy
    ///
    /// The depreciable base is the asset balance as of `as_of` less the
    /// salvage value. `annual` and `monthly` are each rounded to cents, so
    /// twelve monthly charges may drift from the annual figure.
    ///
    /// # Errors
    ///
    /// - `InvalidDepreciationPolicy` for a zero life, zero months or negative salvage
    /// - `UnknownAccount` if a policy account is missing
    pub fn calculate_depreciation_with(
        &mut self,
        policy: &DepreciationPolicy,
        as_of: Option<NaiveDate>,
    ) -> Result<DepreciationRun, LedgerError> {
        policy.validate()?;
        self.resolve(&policy.accumulated_account)?;
        self.resolve(&policy.expense_account)?;

        let cost = self.resolve(&policy.asset_account)?.balance_as_of(as_of);
        let depreciable = cost - policy.salvage_value;

        if !depreciable.is_positive() {
            info!(%cost, "Nothing to depreciate");
            return Ok(DepreciationRun {
                annual: Money::zero(),
                monthly: Money::zero(),
                months: policy.months,
                amount: Money::zero(),
                entry: None,
            });
        }

        let annual = depreciable.divide(Decimal::from(policy.life_years))?;
        let monthly = annual.divide(Decimal::from(MONTHS_PER_YEAR))?;
        let amount = monthly.multiply(Decimal::from(policy.months));

        let date = as_of.unwrap_or_else(today);
        let entry = if amount.is_positive() {
            let posted = self.post_transaction(
                vec![
                    EntryLine::debit(policy.expense_account.as_str(), amount),
                    EntryLine::credit(policy.accumulated_account.as_str(), amount),
                ],
                description(date, policy.months),
                Some(date),
            )?;
            Some(posted.id())
        } else {
            None
        };

        info!(%annual, %monthly, months = policy.months, %amount, "Depreciation run complete");

        Ok(DepreciationRun {
            annual,
            monthly,
            months: policy.months,
            amount,
            entry,
        })
    }
}

fn description(date: NaiveDate, months: u32) -> String {
    let period = date.format("%B %Y");
    if months == 1 {
        format!("Monthly depreciation for {}", period)
    } else {
        format!("Depreciation for {} months through {}", months, period)
    }
}
