//! Stake extraction from parsed Solana transactions.
//!
//! Pulls (owner, amount, block time) out of the jsonParsed response of
//! getTransaction. Every way a transaction can fail to yield a stake is
//! named explicitly so skips stay observable instead of disappearing
//! into a catch-all.

use super::schema::StakeReport;
use crate::aggregator::StakeStats;
use crate::utils::config::SCHEMA_VERSION;
use serde_json::Value;
use std::fmt;

/// One staking deposit observed on chain
#[derive(Debug, Clone, PartialEq)]
pub struct StakeObservation {
    /// Wallet that received the dzSOL
    pub owner: String,
    /// Post-transaction token balance in whole tokens
    pub amount: f64,
    /// Block time in Unix seconds (UTC)
    pub block_time: i64,
}

/// Why a transaction yielded no stake observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Node returned null or the detail was never fetched
    TransactionNotFound,
    /// blockTime field absent or not an integer
    MissingBlockTime,
    /// meta.postTokenBalances absent or not an array
    MissingTokenBalances,
    /// A token balance entry was missing required fields
    MalformedTokenBalance,
    /// No postTokenBalances entry carried the tracked mint
    NoMatchingMint,
}

impl SkipReason {
    /// Short stable name for logs and counters
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TransactionNotFound => "transaction_not_found",
            SkipReason::MissingBlockTime => "missing_block_time",
            SkipReason::MissingTokenBalances => "missing_token_balances",
            SkipReason::MalformedTokenBalance => "malformed_token_balance",
            SkipReason::NoMatchingMint => "no_matching_mint",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of inspecting one transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Transaction contained a balance for the tracked mint
    Stake(StakeObservation),
    /// Transaction was skipped, with the reason
    Skip(SkipReason),
}

/// Extract a stake observation from one transaction detail
///
/// **Public** - main entry point for extraction
///
/// Scans meta.postTokenBalances in order and takes the first entry whose
/// mint matches; later entries for the same mint are ignored.
///
/// # Arguments
/// * `mint` - Token mint to match against
/// * `detail` - jsonParsed transaction detail, or None if never fetched
///
/// # Returns
/// `Extraction::Stake` with the observation, or `Extraction::Skip` naming
/// why the transaction contributed nothing
pub fn extract_stake(mint: &str, detail: Option<&Value>) -> Extraction {
    let tx = match detail {
        Some(value) if !value.is_null() => value,
        _ => return Extraction::Skip(SkipReason::TransactionNotFound),
    };

    let block_time = match tx.get("blockTime").and_then(Value::as_i64) {
        Some(ts) => ts,
        None => return Extraction::Skip(SkipReason::MissingBlockTime),
    };

    let balances = match tx
        .get("meta")
        .and_then(|meta| meta.get("postTokenBalances"))
        .and_then(Value::as_array)
    {
        Some(array) => array,
        None => return Extraction::Skip(SkipReason::MissingTokenBalances),
    };

    for balance in balances {
        let balance_mint = match balance.get("mint").and_then(Value::as_str) {
            Some(m) => m,
            None => return Extraction::Skip(SkipReason::MalformedTokenBalance),
        };

        if balance_mint != mint {
            continue;
        }

        // First matching entry decides the outcome
        return match parse_balance(balance, block_time) {
            Some(observation) => Extraction::Stake(observation),
            None => Extraction::Skip(SkipReason::MalformedTokenBalance),
        };
    }

    Extraction::Skip(SkipReason::NoMatchingMint)
}

/// Parse owner and amount out of one token balance entry
///
/// **Private** - internal helper for extract_stake
fn parse_balance(balance: &Value, block_time: i64) -> Option<StakeObservation> {
    let owner = balance.get("owner")?.as_str()?;

    let ui_amount = balance.get("uiTokenAmount")?;
    let raw: i128 = ui_amount.get("amount")?.as_str()?.parse().ok()?;
    let decimals = ui_amount
        .get("decimals")
        .and_then(Value::as_u64)
        .and_then(|d| u8::try_from(d).ok())?;

    let amount = raw as f64 / 10f64.powi(i32::from(decimals));

    Some(StakeObservation {
        owner: owner.to_string(),
        amount,
        block_time,
    })
}

/// Convert aggregated statistics to the output report format
///
/// **Public** - used by commands to create final output
pub fn to_report(
    deposit_authority: &str,
    mint: &str,
    transactions_scanned: usize,
    stats: &StakeStats,
) -> StakeReport {
    use chrono::Utc;

    StakeReport {
        version: SCHEMA_VERSION.to_string(),
        deposit_authority: deposit_authority.to_string(),
        mint: mint.to_string(),
        transactions_scanned,
        unique_wallets: stats.unique_wallets,
        median_stake: stats.median_stake,
        mean_stake: stats.mean_stake,
        buckets: stats.buckets.clone(),
        daily: stats.daily.clone(),
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINT: &str = "Gekfj7SL2fVpTDxJZmeC46cTYxinjB6gkAnb6EGT6mnn";

    #[test]
    fn test_raw_amount_scaling() {
        let balance = json!({
            "mint": MINT,
            "owner": "WalletA",
            "uiTokenAmount": { "amount": "1500000000", "decimals": 9 }
        });
        let observation = parse_balance(&balance, 1_700_000_000).unwrap();
        assert_eq!(observation.amount, 1.5);
        assert_eq!(observation.owner, "WalletA");
    }

    #[test]
    fn test_negative_raw_amount_is_parsed() {
        let balance = json!({
            "mint": MINT,
            "owner": "WalletA",
            "uiTokenAmount": { "amount": "-2000000000", "decimals": 9 }
        });
        let observation = parse_balance(&balance, 0).unwrap();
        assert_eq!(observation.amount, -2.0);
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let balance = json!({
            "mint": MINT,
            "owner": "WalletA",
            "uiTokenAmount": { "amount": "not-a-number", "decimals": 9 }
        });
        assert!(parse_balance(&balance, 0).is_none());
    }

    #[test]
    fn test_skip_reason_names() {
        assert_eq!(SkipReason::NoMatchingMint.as_str(), "no_matching_mint");
        assert_eq!(
            SkipReason::TransactionNotFound.to_string(),
            "transaction_not_found"
        );
    }
}
