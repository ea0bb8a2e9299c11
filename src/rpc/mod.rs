//! RPC client for communicating with Solana nodes.

pub mod client;
pub mod types;

// Re-export main types
pub use client::RpcClient;
pub use types::{SignatureRecord, TransactionDetail};
