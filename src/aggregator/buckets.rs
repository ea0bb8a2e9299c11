//! Stake-size buckets and per-bucket wallet counting.
//!
//! Buckets partition the positive reals into five half-open ranges.
//! Display order is fixed from smallest to largest and never depends on
//! which buckets actually received wallets.

use std::collections::HashMap;

/// Stake-size category for one wallet's first deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    /// [0, 1) dzSOL
    SubOne,
    /// [1, 5) dzSOL
    OneToFive,
    /// [5, 20) dzSOL
    FiveToTwenty,
    /// [20, 100) dzSOL
    TwentyToHundred,
    /// [100, inf) dzSOL
    OverHundred,
}

impl SizeBucket {
    /// All buckets in display order
    pub const ALL: [SizeBucket; 5] = [
        SizeBucket::SubOne,
        SizeBucket::OneToFive,
        SizeBucket::FiveToTwenty,
        SizeBucket::TwentyToHundred,
        SizeBucket::OverHundred,
    ];

    /// Classify an amount. Negative amounts fall outside every bucket.
    pub fn for_amount(amount: f64) -> Option<SizeBucket> {
        SizeBucket::ALL.iter().copied().find(|bucket| {
            let (low, high) = bucket.bounds();
            low <= amount && amount < high
        })
    }

    /// Half-open [low, high) range covered by this bucket
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            SizeBucket::SubOne => (0.0, 1.0),
            SizeBucket::OneToFive => (1.0, 5.0),
            SizeBucket::FiveToTwenty => (5.0, 20.0),
            SizeBucket::TwentyToHundred => (20.0, 100.0),
            SizeBucket::OverHundred => (100.0, f64::INFINITY),
        }
    }

    /// Human-readable label used in console output and the report
    pub fn label(&self) -> &'static str {
        match self {
            SizeBucket::SubOne => "<1",
            SizeBucket::OneToFive => "1-5",
            SizeBucket::FiveToTwenty => "5-20",
            SizeBucket::TwentyToHundred => "20-100",
            SizeBucket::OverHundred => ">100",
        }
    }
}

/// Wallet counts per stake-size bucket
#[derive(Debug, Clone, Default)]
pub struct BucketCounts {
    counts: HashMap<SizeBucket, u64>,
}

impl BucketCounts {
    /// Create empty counts
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Record one wallet's amount, returning the bucket it landed in
    pub fn record(&mut self, amount: f64) -> Option<SizeBucket> {
        let bucket = SizeBucket::for_amount(amount)?;
        *self.counts.entry(bucket).or_insert(0) += 1;
        Some(bucket)
    }

    /// Wallet count for a specific bucket
    pub fn count_for(&self, bucket: SizeBucket) -> u64 {
        self.counts.get(&bucket).copied().unwrap_or(0)
    }

    /// Total wallets across all buckets
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}
