//! Calendar date ranges used to filter ledger activity
//!
//! Ledger entries carry a calendar date only. Report and statement queries
//! are bounded by an optional start and an optional end, both inclusive.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// An inclusive date range where either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included, None means unbounded
    pub start: Option<NaiveDate>,
    /// Last date included, None means unbounded
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting a start that falls after the end
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(TemporalError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A range covering all dates
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// All dates up to and including `end`
    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// All dates from `start` onwards
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Both bounds set
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        Self::new(Some(start), Some(end))
    }

    /// Returns true if `date` falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Today's calendar date in UTC, the default effective date for postings
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
