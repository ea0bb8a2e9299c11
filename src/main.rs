//! dzSOL Stake Tracker CLI
//!
//! Scans recent deposits to the dzSOL deposit authority and reports how
//! much new wallets staked, as summary statistics, a JSON report, and
//! SVG charts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use dzsol_stake_tracker::commands::{execute_scan, validate_args, ScanArgs};
use dzsol_stake_tracker::utils::config::{
    DEFAULT_DEPOSIT_AUTHORITY, DEFAULT_DZSOL_MINT, DEFAULT_RPC_URL, SCHEMA_VERSION,
};

/// dzSOL Stake Tracker - Staking analytics for dzSOL deposits on Solana
#[derive(Parser, Debug)]
#[command(name = "dzsol-tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan recent staking deposits and build the report
    Scan {
        /// RPC endpoint URL (any Solana JSON-RPC node)
        #[arg(short, long, env = "DZSOL_RPC_URL", default_value = DEFAULT_RPC_URL)]
        rpc: String,

        /// Deposit authority address whose history is scanned
        #[arg(short, long, default_value = DEFAULT_DEPOSIT_AUTHORITY)]
        authority: String,

        /// Token mint to extract stake amounts for
        #[arg(short, long, default_value = DEFAULT_DZSOL_MINT)]
        mint: String,

        /// Maximum number of signatures to fetch
        #[arg(short, long, default_value = "200")]
        limit: usize,

        /// Output path for the JSON report
        #[arg(short = 'o', long, default_value = "stake-report.json")]
        report: PathBuf,

        /// Directory for the SVG charts
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,

        /// Chart width in pixels
        #[arg(long, default_value = "1200")]
        chart_width: usize,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Validate a stake report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Scan {
            rpc,
            authority,
            mint,
            limit,
            report,
            charts_dir,
            chart_width,
            no_charts,
        } => {
            let args = ScanArgs {
                rpc_url: rpc,
                deposit_authority: authority,
                mint,
                limit,
                output_json: report,
                charts_dir,
                chart_width,
                render_charts: !no_charts,
            };

            // Validate args first
            validate_args(&args)?;

            execute_scan(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a stake report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    use dzsol_stake_tracker::output::read_report;

    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid stake report JSON");
    println!("  Version: {}", report.version);
    println!("  Deposit authority: {}", report.deposit_authority);
    println!("  Mint: {}", report.mint);
    println!("  Unique wallets: {}", report.unique_wallets);
    println!("  Buckets: {}", report.buckets.len());
    println!("  Daily entries: {}", report.daily.len());

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("dzSOL Stake Tracker v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Staking analytics for dzSOL deposits on Solana.");
}
