//! Transaction parsing and schema definitions.
//!
//! This module handles:
//! - Extracting stake observations from jsonParsed transactions
//! - Naming every skip reason explicitly
//! - Defining the output report schema

pub mod schema;
pub mod transaction;

// Re-export main types
pub use schema::{BucketCount, DailyCount, StakeReport};
pub use transaction::{extract_stake, to_report, Extraction, SkipReason, StakeObservation};
