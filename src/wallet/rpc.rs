//! Wallet JSON-RPC client
//!
//! Speaks JSON-RPC 2.0 over HTTP POST to the wallet daemon. No retries:
//! every failure is returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::WalletApi;
use super::types::{
    Block, GetTransactionsParams, SendTransactionParams, SendTransactionResult, TransactionsPage,
    WalletStatus,
};
use crate::config::WalletRpcConfig;
use crate::error::WalletError;

/// JSON-RPC request structure
#[derive(Serialize)]
struct JsonRpcRequest<'a, T> {
    jsonrpc: &'static str,
    id: &'a str,
    method: &'a str,
    params: T,
}

/// JSON-RPC response envelope; `result` is decoded in a second step so a
/// missing field is reported as a malformed response, not a transport error.
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// HTTP client for the wallet daemon
#[derive(Clone)]
pub struct WalletRpcClient {
    url: String,
    client: reqwest::Client,
}

impl WalletRpcClient {
    pub fn new(config: &WalletRpcConfig) -> Result<Self, WalletError> {
        if config.url.trim().is_empty() {
            return Err(WalletError::Config("wallet url is empty".to_string()));
        }

        info!(
            "Initializing wallet RPC client at {} (timeout {}ms)",
            config.url, config.timeout_ms
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| WalletError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a JSON-RPC call
    async fn rpc_call<T, R>(&self, id: &str, method: &str, params: T) -> Result<R, WalletError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        debug!(method, "wallet rpc call");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WalletError::Connection(format!("Failed to read response: {}", e)))?;

        let envelope: JsonRpcResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(WalletError::Connection(format!(
                    "HTTP status {} from wallet",
                    status.as_u16()
                )));
            }
            Err(e) => {
                return Err(WalletError::MalformedResponse(format!(
                    "{} response is not JSON-RPC: {}",
                    method, e
                )));
            }
        };

        if let Some(error) = envelope.error {
            warn!(method, code = error.code, "wallet returned error: {}", error.message);
            return Err(WalletError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = envelope.result.ok_or_else(|| {
            WalletError::MalformedResponse(format!("No result in {} response", method))
        })?;

        serde_json::from_value(result)
            .map_err(|e| WalletError::MalformedResponse(format!("{} result: {}", method, e)))
    }
}

#[async_trait]
impl WalletApi for WalletRpcClient {
    async fn get_status(&self) -> Result<WalletStatus, WalletError> {
        self.rpc_call("checkstatus", "getStatus", serde_json::Map::new())
            .await
    }

    async fn get_transactions(
        &self,
        params: GetTransactionsParams,
    ) -> Result<Vec<Block>, WalletError> {
        let page: TransactionsPage = self
            .rpc_call("checktrans", "getTransactions", params)
            .await?;
        Ok(page.items)
    }

    async fn send_transaction(
        &self,
        params: &SendTransactionParams,
    ) -> Result<SendTransactionResult, WalletError> {
        self.rpc_call("withdrawal", "sendTransaction", params).await
    }
}
