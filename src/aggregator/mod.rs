//! Aggregation of stake observations into the ledger and statistics.
//!
//! This module transforms extracted observations into:
//! - A deduplicated first-stake ledger with day grouping
//! - Stake-size bucket counts
//! - Overall and per-day summary statistics

pub mod buckets;
pub mod collector;
pub mod metrics;

// Re-export main types and functions
pub use buckets::{BucketCounts, SizeBucket};
pub use collector::StakeLedger;
pub use metrics::{mean, median, summarize, StakeStats};
