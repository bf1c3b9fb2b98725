//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built amounts, dates and seeded ledgers
//! - `builders`: Builder patterns for entries and ledgers
//! - `storage`: File store helpers backed by temporary directories
//! - `assertions`: Custom assertion helpers for ledger types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod storage;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use storage::*;
pub use assertions::*;
pub use generators::*;
