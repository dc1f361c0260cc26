//! editionmint SDK - chain access for the minting toolchain.
//!
//! Provides the JSON-RPC client, the `ChainClient` trait the pipeline is
//! written against, minimal Solidity ABI encoding, and bindings for the
//! editions contract (`owner()`, `createEdition`, the `EditionCreated` event).

pub mod abi;
pub mod client;
pub mod contract;
pub mod errors;
pub mod events;

pub use client::{CallRequest, ChainClient, RpcClient};
pub use contract::EditionsContract;
pub use errors::{Result, SdkError};
pub use events::extract_token_id;
