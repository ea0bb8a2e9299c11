//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for RPC requests
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default Solana RPC endpoint. The placeholder key must be replaced on the
/// command line or through the DZSOL_RPC_URL environment variable.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.helius-rpc.com/?api-key=YOUR_HELIUS_API_KEY";

/// Deposit authority whose transaction history is scanned
pub const DEFAULT_DEPOSIT_AUTHORITY: &str = "Ewb5s8pgcWgcuWeat6qzS2r3BKLHiQn61iohnYtVUzyW";

/// dzSOL token mint
pub const DEFAULT_DZSOL_MINT: &str = "Gekfj7SL2fVpTDxJZmeC46cTYxinjB6gkAnb6EGT6mnn";

/// Default number of signatures to fetch (a single page, newest first)
pub const DEFAULT_TX_LIMIT: usize = 200;

/// Hard cap enforced by getSignaturesForAddress per page
pub const MAX_TX_LIMIT: usize = 1000;
