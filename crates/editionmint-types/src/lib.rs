//! editionmint types - shared value types for the minting toolchain.
//!
//! This crate provides the fundamental types used by the SDK and CLI:
//! - Addresses (20-byte, hex encoded)
//! - Hashes (32-byte transaction hashes and log topics)
//! - Transaction receipts and event logs as returned over JSON-RPC

pub mod address;
pub mod error;
pub mod hash;
pub mod receipt;

pub use address::Address;
pub use error::TypesError;
pub use hash::Hash;
pub use receipt::{Log, TransactionReceipt};
