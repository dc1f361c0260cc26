//! Error types for the SDK.

use thiserror::Error;

/// SDK result type.
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK errors.
#[derive(Error, Debug, Clone)]
pub enum SdkError {
    /// Transport-level failure reaching the node
    #[error("Connection error: {0}")]
    Connection(String),

    /// The node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    /// The node answered with something we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// ABI encoding or decoding failure
    #[error("ABI error: {0}")]
    Abi(String),

    /// Timed out waiting on the node
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::Connection(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(e.to_string())
    }
}
