//! End-to-end pipeline over synthetic transaction details: extraction,
//! aggregation, report building, and chart rendering without touching
//! the network.

use dzsol_stake_tracker::aggregator::{summarize, StakeLedger};
use dzsol_stake_tracker::charts::{render_boxplot, render_daily_stakers, render_histogram};
use dzsol_stake_tracker::parser::{extract_stake, to_report, Extraction};
use serde_json::json;

const DZSOL_MINT: &str = "Gekfj7SL2fVpTDxJZmeC46cTYxinjB6gkAnb6EGT6mnn";
const DEPOSIT_AUTHORITY: &str = "Ewb5s8pgcWgcuWeat6qzS2r3BKLHiQn61iohnYtVUzyW";

// 2024-01-15 and 2024-01-16, 00:00:00 UTC
const DAY_ONE: i64 = 1_705_276_800;
const DAY_TWO: i64 = 1_705_363_200;

fn stake_tx(owner: &str, raw_amount: &str, block_time: i64) -> serde_json::Value {
    json!({
        "blockTime": block_time,
        "meta": {
            "postTokenBalances": [
                {
                    "mint": DZSOL_MINT,
                    "owner": owner,
                    "uiTokenAmount": { "amount": raw_amount, "decimals": 9 }
                }
            ]
        }
    })
}

#[test]
fn test_scan_pipeline_dedupes_and_groups() {
    // WalletA stakes 0.5 on day one, WalletB 3.2 on day one,
    // then WalletA shows up again with 9.0 on day two
    let details = vec![
        stake_tx("WalletA", "500000000", DAY_ONE),
        stake_tx("WalletB", "3200000000", DAY_ONE + 7200),
        stake_tx("WalletA", "9000000000", DAY_TWO),
    ];

    let mut ledger = StakeLedger::new();
    for detail in &details {
        if let Extraction::Stake(observation) = extract_stake(DZSOL_MINT, Some(detail)) {
            ledger.record(&observation);
        }
    }

    let stats = summarize(&ledger);

    assert_eq!(stats.unique_wallets, 2);
    assert_eq!(stats.median_stake, 1.85);
    assert_eq!(stats.mean_stake, 1.85);

    // One wallet in "<1", one in "1-5", nothing else
    assert_eq!(stats.buckets[0].label, "<1");
    assert_eq!(stats.buckets[0].wallets, 1);
    assert_eq!(stats.buckets[1].label, "1-5");
    assert_eq!(stats.buckets[1].wallets, 1);
    assert!(stats.buckets[2..].iter().all(|b| b.wallets == 0));

    // Day two contributed nothing because WalletA was already counted
    assert_eq!(stats.daily.len(), 1);
    assert_eq!(stats.daily[0].date, "2024-01-15");
    assert_eq!(stats.daily[0].new_wallets, 2);
    assert_eq!(stats.daily[0].median_stake, 1.85);
}

#[test]
fn test_pipeline_builds_report() {
    let details = vec![
        stake_tx("WalletA", "500000000", DAY_ONE),
        stake_tx("WalletB", "3200000000", DAY_ONE),
    ];

    let mut ledger = StakeLedger::new();
    for detail in &details {
        if let Extraction::Stake(observation) = extract_stake(DZSOL_MINT, Some(detail)) {
            ledger.record(&observation);
        }
    }

    let stats = summarize(&ledger);
    let report = to_report(DEPOSIT_AUTHORITY, DZSOL_MINT, details.len(), &stats);

    assert_eq!(report.version, "1.0.0");
    assert_eq!(report.deposit_authority, DEPOSIT_AUTHORITY);
    assert_eq!(report.mint, DZSOL_MINT);
    assert_eq!(report.transactions_scanned, 2);
    assert_eq!(report.unique_wallets, 2);
    assert_eq!(report.buckets.len(), 5);
    assert_eq!(report.daily.len(), 1);
    assert!(!report.generated_at.is_empty());
}

#[test]
fn test_pipeline_renders_all_three_charts() {
    let details = vec![
        stake_tx("WalletA", "500000000", DAY_ONE),
        stake_tx("WalletB", "3200000000", DAY_ONE),
        stake_tx("WalletC", "150000000000", DAY_TWO),
    ];

    let mut ledger = StakeLedger::new();
    for detail in &details {
        if let Extraction::Stake(observation) = extract_stake(DZSOL_MINT, Some(detail)) {
            ledger.record(&observation);
        }
    }
    let stats = summarize(&ledger);

    let histogram = render_histogram(ledger.amounts(), None).unwrap();
    assert!(histogram.contains("Distribution of dzSOL staked by new wallets"));

    let boxplot = render_boxplot(ledger.amounts(), None).unwrap();
    assert!(boxplot.contains("Boxplot of dzSOL staked"));

    let daily = render_daily_stakers(&stats.daily, None).unwrap();
    assert!(daily.contains("New dzSOL stakers per day"));
    assert!(daily.contains("2024-01-15"));
    assert!(daily.contains("2024-01-16"));
}

#[test]
fn test_pipeline_with_mixed_transactions() {
    // A mix of unusable transactions around one good stake
    let missing_time = json!({
        "meta": { "postTokenBalances": [] }
    });
    let wrong_mint = json!({
        "blockTime": DAY_ONE,
        "meta": {
            "postTokenBalances": [
                {
                    "mint": "So11111111111111111111111111111111111111112",
                    "owner": "Bystander",
                    "uiTokenAmount": { "amount": "1", "decimals": 0 }
                }
            ]
        }
    });
    let good = stake_tx("WalletA", "500000000", DAY_ONE);

    let mut ledger = StakeLedger::new();
    let mut skipped = 0;
    for detail in [&missing_time, &wrong_mint, &good, &json!(null)] {
        match extract_stake(DZSOL_MINT, Some(detail)) {
            Extraction::Stake(observation) => {
                ledger.record(&observation);
            }
            Extraction::Skip(_) => skipped += 1,
        }
    }

    assert_eq!(skipped, 3);
    assert_eq!(ledger.unique_wallets(), 1);
    assert_eq!(ledger.amounts(), &[0.5]);
}

#[test]
fn test_empty_pipeline_yields_no_charts() {
    let ledger = StakeLedger::new();
    assert!(ledger.is_empty());

    // Empty data is a named error, not a panic
    assert!(render_histogram(ledger.amounts(), None).is_err());
    assert!(render_boxplot(ledger.amounts(), None).is_err());
    assert!(render_daily_stakers(&[], None).is_err());
}
