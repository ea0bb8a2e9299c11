//! Output JSON schema definitions for stake report data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level stake report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Deposit authority whose history was scanned
    pub deposit_authority: String,

    /// Token mint the stake amounts were extracted for
    pub mint: String,

    /// Number of transaction signatures inspected
    pub transactions_scanned: usize,

    /// Count of distinct first-time staker wallets
    pub unique_wallets: usize,

    /// Median stake across all unique wallets
    pub median_stake: f64,

    /// Mean stake across all unique wallets
    pub mean_stake: f64,

    /// Wallet counts per stake-size bucket, in display order
    pub buckets: Vec<BucketCount>,

    /// New stakers per UTC day, oldest first
    pub daily: Vec<DailyCount>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Wallet count for one stake-size bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketCount {
    /// Human-readable bucket label (e.g., "1-5")
    pub label: String,

    /// Number of wallets whose first stake falls in this bucket
    pub wallets: u64,
}

/// New-staker statistics for one UTC day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    /// Day in YYYY-MM-DD form
    pub date: String,

    /// Wallets that staked for the first time on this day
    pub new_wallets: u64,

    /// Median stake among those wallets
    pub median_stake: f64,
}
