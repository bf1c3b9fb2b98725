//! Core Kernel - Foundational types for the ledger engine
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money with fixed two-digit decimal precision
//! - Inclusive calendar date ranges
//! - Journal entry identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, MoneyError, MINOR_UNIT_DIGITS};
pub use temporal::{today, DateRange, TemporalError};
pub use identifiers::JournalEntryId;
pub use error::CoreError;
