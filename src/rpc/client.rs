//! HTTP client for communicating with a Solana RPC endpoint.

use super::types::{JsonRpcRequest, JsonRpcResponse, SignatureRecord, TransactionDetail};
use crate::utils::config::DEFAULT_RPC_TIMEOUT;
use crate::utils::error::RpcError;
use log::{debug, warn};
use reqwest::blocking::Client;

/// Blocking RPC client for signature and transaction lookups
pub struct RpcClient {
    client: Client,
    rpc_url: String,
}

impl RpcClient {
    /// Create a new RPC client
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(DEFAULT_RPC_TIMEOUT)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
        })
    }

    /// Fetch up to `limit` recent transaction signatures for an address.
    ///
    /// Records come back in RPC order, newest first. An RPC-level error or
    /// a missing `result` field yields an empty list; only transport
    /// failures surface as `Err`.
    ///
    /// # Arguments
    /// * `address` - Base58 account address
    /// * `limit` - Maximum number of signatures (single page, no pagination)
    pub fn fetch_signatures(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, RpcError> {
        let request = JsonRpcRequest::signatures_for_address(address, limit, 1);
        let response: JsonRpcResponse<Vec<serde_json::Value>> = self.post(&request)?;

        if let Some(error) = response.error {
            warn!(
                "getSignaturesForAddress returned error {}: {}",
                error.code, error.message
            );
            return Ok(Vec::new());
        }

        let raw_records = match response.result {
            Some(records) => records,
            None => {
                debug!("getSignaturesForAddress returned no result field");
                return Ok(Vec::new());
            }
        };

        // Tolerate individual malformed entries rather than dropping the page
        let mut records = Vec::with_capacity(raw_records.len());
        for (index, value) in raw_records.into_iter().enumerate() {
            match serde_json::from_value::<SignatureRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => debug!("Skipping malformed signature record {}: {}", index, e),
            }
        }

        Ok(records)
    }

    /// Fetch the parsed detail for one transaction signature.
    ///
    /// Returns `Ok(None)` when the node does not know the transaction
    /// (null result) or refuses the call; callers must tolerate the
    /// absence and move on to the next signature.
    pub fn get_transaction(&self, signature: &str) -> Result<Option<TransactionDetail>, RpcError> {
        let request = JsonRpcRequest::transaction(signature, 1);
        let response: JsonRpcResponse<TransactionDetail> = self.post(&request)?;

        if let Some(error) = response.error {
            warn!(
                "getTransaction {} returned error {}: {}",
                signature, error.code, error.message
            );
            return Ok(None);
        }

        Ok(response.result)
    }

    /// POST one JSON-RPC request and deserialize the response body
    fn post<T>(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse<T>, RpcError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("RPC request: {} {}", request.method, request.params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(request)
            .send()
            .map_err(RpcError::RequestFailed)?;

        response.json().map_err(RpcError::RequestFailed)
    }
}
