use crate::address::Address;
use crate::hash::Hash;
use serde::Deserialize;

/// Confirmation record for a mined transaction, as returned by
/// `eth_getTransactionReceipt`. Quantity fields arrive as `0x`-prefixed hex
/// strings and are decoded on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the transaction
    pub transaction_hash: Hash,
    /// Number of the block containing this transaction
    #[serde(with = "quantity")]
    pub block_number: u64,
    /// Gas used by this transaction
    #[serde(with = "quantity")]
    pub gas_used: u64,
    /// Whether the transaction succeeded (`0x1`) or reverted (`0x0`)
    #[serde(deserialize_with = "quantity::deserialize_bool")]
    pub status: bool,
    /// Logs emitted during execution
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// Check if the transaction succeeded
    pub fn is_success(&self) -> bool {
        self.status
    }

    /// Check if the transaction reverted
    pub fn is_failure(&self) -> bool {
        !self.status
    }
}

impl Default for TransactionReceipt {
    fn default() -> Self {
        Self {
            transaction_hash: Hash::ZERO,
            block_number: 0,
            gas_used: 0,
            status: false,
            logs: Vec::new(),
        }
    }
}

/// A single event log entry emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Contract that emitted the log
    pub address: Address,
    /// Indexed topics; `topics[0]` is the event signature hash
    #[serde(default)]
    pub topics: Vec<Hash>,
    /// Non-indexed event data
    #[serde(default, with = "hexdata")]
    pub data: Vec<u8>,
}

/// Serde adapter for JSON-RPC quantities (`"0x64"` -> 100).
mod quantity {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(D::Error::custom)
    }

    pub fn deserialize_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(parse(&s).map_err(D::Error::custom)? != 0)
    }

    pub fn parse(s: &str) -> Result<u64, String> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| format!("quantity without 0x prefix: {s:?}"))?;
        u64::from_str_radix(digits, 16).map_err(|e| format!("bad quantity {s:?}: {e}"))
    }
}

/// Serde adapter for unformatted JSON-RPC data (`"0xdeadbeef"` -> bytes).
mod hexdata {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(&s);
        hex::decode(digits).map_err(D::Error::custom)
    }
}
