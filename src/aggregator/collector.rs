//! First-stake ledger: deduplication and day grouping.
//!
//! The scan walks transactions newest first, and a wallet's first
//! appearance in that order is the one that counts. Later observations
//! of the same owner are ignored entirely.

use super::buckets::BucketCounts;
use crate::parser::StakeObservation;
use chrono::{DateTime, NaiveDate};
use log::warn;
use std::collections::{BTreeMap, HashSet};

/// Accumulated first-stake observations across a scan
#[derive(Debug, Default)]
pub struct StakeLedger {
    seen_wallets: HashSet<String>,
    amounts: Vec<f64>,
    daily: BTreeMap<NaiveDate, Vec<f64>>,
    buckets: BucketCounts,
}

impl StakeLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation. Returns true if it was accepted as the
    /// owner's first stake, false if the owner was already seen or the
    /// block time falls outside the representable range.
    pub fn record(&mut self, observation: &StakeObservation) -> bool {
        if self.seen_wallets.contains(&observation.owner) {
            return false;
        }

        let date = match DateTime::from_timestamp(observation.block_time, 0) {
            Some(datetime) => datetime.date_naive(),
            None => {
                warn!(
                    "Block time {} out of range, dropping observation for {}",
                    observation.block_time, observation.owner
                );
                return false;
            }
        };

        self.seen_wallets.insert(observation.owner.clone());
        self.amounts.push(observation.amount);
        self.daily.entry(date).or_default().push(observation.amount);
        self.buckets.record(observation.amount);

        true
    }

    /// True when no observation has been accepted
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Number of distinct wallets recorded
    pub fn unique_wallets(&self) -> usize {
        self.seen_wallets.len()
    }

    /// First-stake amounts in acceptance order
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Amounts grouped by UTC day, ascending by date
    pub fn daily(&self) -> &BTreeMap<NaiveDate, Vec<f64>> {
        &self.daily
    }

    /// Per-bucket wallet counts
    pub fn buckets(&self) -> &BucketCounts {
        &self.buckets
    }
}
