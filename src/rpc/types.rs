//! Types for JSON-RPC communication with a Solana node.
//!
//! Based on the JSON-RPC 2.0 spec and Solana's getSignaturesForAddress /
//! getTransaction methods.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request for getSignaturesForAddress
    ///
    /// # Arguments
    /// * `address` - Base58 account address to list signatures for
    /// * `limit` - Maximum number of signatures to return (newest first)
    /// * `id` - Request ID (for response correlation)
    pub fn signatures_for_address(address: &str, limit: usize, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "getSignaturesForAddress".to_string(),
            params: serde_json::json!([
                address,
                {
                    "limit": limit
                }
            ]),
            id,
        }
    }

    /// Create a new JSON-RPC request for getTransaction
    ///
    /// # Arguments
    /// * `signature` - Base58 transaction signature
    /// * `id` - Request ID (for response correlation)
    pub fn transaction(signature: &str, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "getTransaction".to_string(),
            params: serde_json::json!([
                signature,
                {
                    "encoding": "jsonParsed"
                }
            ]),
            id,
        }
    }
}

/// JSON-RPC 2.0 response structure
///
/// `jsonrpc` and `id` are tolerant of unusual shapes: some endpoints echo
/// a null id on errors.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value,
    // No serde default here: it would put a `T: Default` bound on the
    // derived Deserialize impl, and Option already maps a missing or
    // null key to None
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// One entry from getSignaturesForAddress
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureRecord {
    pub signature: String,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default, rename = "blockTime")]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
}

/// Raw transaction detail from getTransaction (opaque, parsed later)
///
/// We keep this as `serde_json::Value` because the jsonParsed schema
/// carries far more than the token balances we need. The parser will
/// handle validation.
pub type TransactionDetail = serde_json::Value;
