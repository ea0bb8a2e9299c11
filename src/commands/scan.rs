//! Scan command implementation.
//!
//! The scan command:
//! 1. Fetches recent transaction signatures for the deposit authority
//! 2. Fetches each transaction and extracts stake observations
//! 3. Aggregates first stakes per wallet and computes statistics
//! 4. Writes the JSON report and SVG charts

use crate::aggregator::{summarize, StakeLedger, StakeStats};
use crate::charts::{render_boxplot, render_daily_stakers, render_histogram, ChartConfig};
use crate::output::{write_report, write_svg};
use crate::parser::{extract_stake, to_report, Extraction, SkipReason};
use crate::rpc::RpcClient;
use crate::utils::config::{
    DEFAULT_DEPOSIT_AUTHORITY, DEFAULT_DZSOL_MINT, DEFAULT_RPC_URL, DEFAULT_TX_LIMIT, MAX_TX_LIMIT,
};
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the scan command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ScanArgs {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Deposit authority whose transaction history is scanned
    pub deposit_authority: String,

    /// Token mint to extract stake amounts for
    pub mint: String,

    /// Maximum number of signatures to fetch (single page)
    pub limit: usize,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Directory for the SVG charts
    pub charts_dir: PathBuf,

    /// Chart width in pixels
    pub chart_width: usize,

    /// Render SVG charts after the console summary
    pub render_charts: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            deposit_authority: DEFAULT_DEPOSIT_AUTHORITY.to_string(),
            mint: DEFAULT_DZSOL_MINT.to_string(),
            limit: DEFAULT_TX_LIMIT,
            output_json: PathBuf::from("stake-report.json"),
            charts_dir: PathBuf::from("charts"),
            chart_width: 1200,
            render_charts: true,
        }
    }
}

/// Execute the scan command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Scan command arguments
///
/// # Returns
/// Ok if the scan succeeds, Err with context if any step fails
///
/// # Errors
/// * RPC transport failures
/// * File write errors
pub fn execute_scan(args: ScanArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting scan for deposit authority: {}", args.deposit_authority);
    info!("Tracked mint: {}", args.mint);

    println!("Fetching recent dzSOL staking transactions...");

    // Step 1: Fetch signatures
    info!("Step 1/4: Fetching up to {} signatures...", args.limit);
    let client = RpcClient::new(&args.rpc_url).context("Failed to create RPC client")?;
    let signatures = client
        .fetch_signatures(&args.deposit_authority, args.limit)
        .context("Failed to fetch signatures")?;

    debug!("Fetched {} signature records", signatures.len());

    // Step 2: Fetch transactions and extract stakes
    info!("Step 2/4: Extracting stakes from {} transactions...", signatures.len());
    let mut ledger = StakeLedger::new();
    let mut skips: HashMap<SkipReason, usize> = HashMap::new();

    for record in &signatures {
        let detail = client
            .get_transaction(&record.signature)
            .with_context(|| format!("Failed to fetch transaction {}", record.signature))?;

        match extract_stake(&args.mint, detail.as_ref()) {
            Extraction::Stake(observation) => {
                if !ledger.record(&observation) {
                    debug!("Wallet {} already counted, ignoring", observation.owner);
                }
            }
            Extraction::Skip(reason) => {
                debug!("Skipping {}: {}", record.signature, reason);
                *skips.entry(reason).or_insert(0) += 1;
            }
        }
    }

    for (reason, count) in &skips {
        debug!("Skipped {} transactions: {}", count, reason);
    }
    info!(
        "Recorded {} unique wallets ({} transactions skipped)",
        ledger.unique_wallets(),
        skips.values().sum::<usize>()
    );

    if ledger.is_empty() {
        println!("⚠️ No dzSOL staking transactions found. Check deposit authority or mint.");
        return Ok(());
    }

    // Step 3: Summarize and write the report
    info!("Step 3/4: Computing statistics...");
    let stats = summarize(&ledger);
    print_summary(&stats);

    let report = to_report(&args.deposit_authority, &args.mint, signatures.len(), &stats);
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output_json.display());

    // Step 4: Render charts
    if args.render_charts {
        info!("Step 4/4: Rendering charts...");
        render_charts(&args, &ledger, &stats)?;
    } else {
        info!("Step 4/4: Skipping chart rendering (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Scan completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Print the console summary in display order
///
/// **Private** - internal helper for execute_scan
fn print_summary(stats: &StakeStats) {
    println!();
    println!("Overall Median dzSOL: {:.2}", stats.median_stake);
    println!("Overall Mean dzSOL: {:.2}", stats.mean_stake);
    println!("Total unique wallets: {}", stats.unique_wallets);

    println!();
    println!("Wallet distribution by bucket:");
    for bucket in &stats.buckets {
        println!("{}: {} wallets", bucket.label, bucket.wallets);
    }

    println!();
    println!("New stakers per day:");
    for day in &stats.daily {
        println!(
            "{}: {} wallets, median dzSOL = {:.2}",
            day.date, day.new_wallets, day.median_stake
        );
    }
}

/// Render and write all three charts
///
/// **Private** - internal helper for execute_scan
fn render_charts(args: &ScanArgs, ledger: &StakeLedger, stats: &StakeStats) -> Result<()> {
    let config = ChartConfig::new().with_size(args.chart_width, 600);

    let histogram =
        render_histogram(ledger.amounts(), Some(&config)).context("Failed to render histogram")?;
    let histogram_path = args.charts_dir.join("stake_histogram.svg");
    write_svg(&histogram, &histogram_path).context("Failed to write histogram SVG")?;
    info!("✓ Histogram written to: {}", histogram_path.display());

    let boxplot =
        render_boxplot(ledger.amounts(), Some(&config)).context("Failed to render boxplot")?;
    let boxplot_path = args.charts_dir.join("stake_boxplot.svg");
    write_svg(&boxplot, &boxplot_path).context("Failed to write boxplot SVG")?;
    info!("✓ Boxplot written to: {}", boxplot_path.display());

    let daily = render_daily_stakers(&stats.daily, Some(&config))
        .context("Failed to render daily staker chart")?;
    let daily_path = args.charts_dir.join("daily_stakers.svg");
    write_svg(&daily, &daily_path).context("Failed to write daily staker SVG")?;
    info!("✓ Daily staker chart written to: {}", daily_path.display());

    Ok(())
}

/// Validate scan arguments
///
/// **Public** - can be called before execute_scan for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ScanArgs) -> Result<()> {
    // Validate RPC URL
    if args.rpc_url.is_empty() {
        anyhow::bail!("RPC URL cannot be empty");
    }

    if !args.rpc_url.starts_with("http://") && !args.rpc_url.starts_with("https://") {
        anyhow::bail!("RPC URL must start with http:// or https://");
    }

    validate_address(&args.deposit_authority, "Deposit authority")?;
    validate_address(&args.mint, "Mint")?;

    // Validate limit
    if args.limit == 0 {
        anyhow::bail!("limit must be greater than 0");
    }

    if args.limit > MAX_TX_LIMIT {
        anyhow::bail!("limit is too large (max {})", MAX_TX_LIMIT);
    }

    // Validate chart width
    if args.render_charts && (args.chart_width < 400 || args.chart_width > 10_000) {
        anyhow::bail!("chart width must be between 400 and 10000 pixels");
    }

    Ok(())
}

/// Basic base58 shape check for Solana addresses
///
/// **Private** - internal helper for validate_args
fn validate_address(address: &str, label: &str) -> Result<()> {
    if address.is_empty() {
        anyhow::bail!("{} address cannot be empty", label);
    }

    if address.len() < 32 || address.len() > 44 {
        anyhow::bail!("{} address must be 32-44 base58 characters", label);
    }

    // Base58 alphabet excludes 0, O, I, and l
    if !address
        .chars()
        .all(|c| c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l'))
    {
        anyhow::bail!("{} address contains non-base58 characters", label);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = ScanArgs::default();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_rpc() {
        let args = ScanArgs {
            rpc_url: String::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_rpc_scheme() {
        let args = ScanArgs {
            rpc_url: "ftp://localhost:8899".to_string(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_authority() {
        let args = ScanArgs {
            deposit_authority: String::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_short_authority() {
        let args = ScanArgs {
            deposit_authority: "abc".to_string(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_non_base58_mint() {
        let args = ScanArgs {
            // 'O' and '0' are not in the base58 alphabet
            mint: "O0000000000000000000000000000000000".to_string(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_limit_zero() {
        let args = ScanArgs {
            limit: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_limit_too_large() {
        let args = ScanArgs {
            limit: 2000,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_chart_width_bounds() {
        let narrow = ScanArgs {
            chart_width: 100,
            ..Default::default()
        };
        assert!(validate_args(&narrow).is_err());

        // Width is irrelevant when charts are disabled
        let no_charts = ScanArgs {
            chart_width: 100,
            render_charts: false,
            ..Default::default()
        };
        assert!(validate_args(&no_charts).is_ok());
    }
}
