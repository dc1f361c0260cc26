//! HTTP client for talking JSON-RPC to the chain node.

use async_trait::async_trait;
use editionmint_types::{Address, Hash, TransactionReceipt};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;
use std::time::Duration;

use crate::errors::{Result, SdkError};

/// RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

/// RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// RPC error body.
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i32,
    message: String,
}

/// Call parameters for `eth_call`, `eth_estimateGas` and
/// `eth_sendTransaction`. Accounts and signing stay on the node side, so a
/// request is nothing more than this JSON object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser_quantity")]
    pub gas: Option<u64>,
    #[serde(serialize_with = "ser_data")]
    pub data: Vec<u8>,
}

fn ser_quantity<S: Serializer>(value: &Option<u64>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    // skip_serializing_if guarantees Some here
    serializer.serialize_str(&format!("0x{:x}", value.unwrap_or(0)))
}

fn ser_data<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(data)))
}

/// The chain operations the mint pipeline needs. `RpcClient` is the real
/// implementation; tests substitute recording mocks.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Accounts the node manages, first one is the caller.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Balance in wei.
    async fn balance(&self, address: &Address) -> Result<u128>;

    /// Deployed bytecode at an address, empty for externally owned accounts.
    async fn code(&self, address: &Address) -> Result<Vec<u8>>;

    /// Read-only contract call.
    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>>;

    /// Gas estimate for a state-changing call.
    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64>;

    /// Submit a transaction, signed by the node.
    async fn send_transaction(&self, request: &CallRequest) -> Result<Hash>;

    /// Receipt for a transaction, `None` while still pending.
    async fn transaction_receipt(&self, hash: &Hash) -> Result<Option<TransactionReceipt>>;

    /// Poll until the node reports a receipt. Each poll is bounded by the
    /// transport timeout; the wait itself is unbounded.
    async fn wait_for_transaction(&self, hash: &Hash) -> Result<TransactionReceipt> {
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

/// JSON-RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    /// Create a new client against a node URL.
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            url: url.into(),
        }
    }

    /// Node URL this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Chain ID the node reports.
    pub async fn chain_id(&self) -> Result<u64> {
        let hex: String = self.request("eth_chainId", json!([])).await?;
        parse_hex_u64(&hex)
    }

    /// Make an RPC request.
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        log::debug!("rpc {} -> {}", method, self.url);

        let response_text = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .text()
            .await?;

        let response: RpcResponse = serde_json::from_str(&response_text)
            .map_err(|e| SdkError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let value = response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value)
            .map_err(|e| SdkError::InvalidResponse(format!("{method}: {e}")))
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    async fn balance(&self, address: &Address) -> Result<u128> {
        let hex: String = self
            .request("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?;
        parse_hex_u128(&hex)
    }

    async fn code(&self, address: &Address) -> Result<Vec<u8>> {
        let hex: String = self
            .request("eth_getCode", json!([address.to_string(), "latest"]))
            .await?;
        decode_hex_data(&hex)
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>> {
        let hex: String = self.request("eth_call", json!([request, "latest"])).await?;
        decode_hex_data(&hex)
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64> {
        let hex: String = self.request("eth_estimateGas", json!([request])).await?;
        parse_hex_u64(&hex)
    }

    async fn send_transaction(&self, request: &CallRequest) -> Result<Hash> {
        let hex: String = self.request("eth_sendTransaction", json!([request])).await?;
        hex.parse()
            .map_err(|e| SdkError::InvalidResponse(format!("transaction hash: {e}")))
    }

    async fn transaction_receipt(&self, hash: &Hash) -> Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await
    }
}

/// Parse hex u64.
fn parse_hex_u64(hex: &str) -> Result<u64> {
    let digits = hex.trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|e| SdkError::InvalidResponse(format!("bad quantity {hex:?}: {e}")))
}

/// Parse hex u128. Wei balances fit comfortably; anything larger is a
/// malformed response.
fn parse_hex_u128(hex: &str) -> Result<u128> {
    let digits = hex.trim_start_matches("0x");
    u128::from_str_radix(digits, 16)
        .map_err(|e| SdkError::InvalidResponse(format!("bad quantity {hex:?}: {e}")))
}

/// Decode `0x`-prefixed unformatted data.
fn decode_hex_data(hex: &str) -> Result<Vec<u8>> {
    let digits = hex.trim_start_matches("0x");
    hex::decode(digits).map_err(|e| SdkError::InvalidResponse(format!("bad data {hex:?}: {e}")))
}
