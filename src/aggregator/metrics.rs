//! Summary statistics over the first-stake ledger.
//!
//! Medians use linear interpolation for even-length input: the median of
//! an even-length set is the mean of the two middle values, not either
//! one alone.

use super::buckets::SizeBucket;
use super::collector::StakeLedger;
use crate::parser::schema::{BucketCount, DailyCount};
use log::debug;
use std::cmp::Ordering;

/// Aggregated statistics ready for display and reporting
///
/// **Public** - returned from summarize
#[derive(Debug, Clone)]
pub struct StakeStats {
    /// Median stake across all unique wallets
    pub median_stake: f64,

    /// Mean stake across all unique wallets
    pub mean_stake: f64,

    /// Count of distinct wallets
    pub unique_wallets: usize,

    /// Per-bucket wallet counts, in display order
    pub buckets: Vec<BucketCount>,

    /// Per-day new-staker counts with daily medians, oldest day first
    pub daily: Vec<DailyCount>,
}

/// Compute summary statistics from a ledger
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `ledger` - Accumulated first-stake observations
///
/// # Returns
/// Overall median/mean, bucket breakdown, and the daily series
pub fn summarize(ledger: &StakeLedger) -> StakeStats {
    debug!(
        "Summarizing {} wallets across {} days",
        ledger.unique_wallets(),
        ledger.daily().len()
    );

    let buckets = SizeBucket::ALL
        .iter()
        .map(|bucket| BucketCount {
            label: bucket.label().to_string(),
            wallets: ledger.buckets().count_for(*bucket),
        })
        .collect();

    let daily = ledger
        .daily()
        .iter()
        .map(|(date, amounts)| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            new_wallets: amounts.len() as u64,
            median_stake: median(amounts),
        })
        .collect();

    StakeStats {
        median_stake: median(ledger.amounts()),
        mean_stake: mean(ledger.amounts()),
        unique_wallets: ledger.unique_wallets(),
        buckets,
        daily,
    }
}

/// Median of a slice. Returns 0.0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Arithmetic mean of a slice. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StakeObservation;

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_median_even_length_interpolates() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_single_value() {
        assert_eq!(median(&[7.5]), 7.5);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_summarize_small_ledger() {
        let mut ledger = StakeLedger::new();
        for (owner, amount) in [("WalletA", 0.5), ("WalletB", 3.2), ("WalletC", 150.0)] {
            ledger.record(&StakeObservation {
                owner: owner.to_string(),
                amount,
                block_time: 1_705_276_800,
            });
        }

        let stats = summarize(&ledger);
        assert_eq!(stats.unique_wallets, 3);
        assert_eq!(stats.median_stake, 3.2);

        // Bucket order is fixed, including empty buckets
        let labels: Vec<&str> = stats.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["<1", "1-5", "5-20", "20-100", ">100"]);
        assert_eq!(stats.buckets[0].wallets, 1);
        assert_eq!(stats.buckets[1].wallets, 1);
        assert_eq!(stats.buckets[2].wallets, 0);
        assert_eq!(stats.buckets[4].wallets, 1);

        assert_eq!(stats.daily.len(), 1);
        assert_eq!(stats.daily[0].date, "2024-01-15");
        assert_eq!(stats.daily[0].new_wallets, 3);
    }
}
