//! Durable record of a completed mint.
//!
//! One pretty-printed JSON document per run, named after the network and the
//! moment of writing so repeated runs never collide.

use chrono::Utc;
use editionmint_types::{Address, Hash};
use serde::{Serialize, Serializer};
use std::io;
use std::path::{Path, PathBuf};

/// Token identifier recovered from the confirmation event, or the `unknown`
/// sentinel when no log decoded. Serializes as a number or the string
/// `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    Id(u64),
    Unknown,
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenId::Id(id) => serializer.serialize_u64(*id),
            TokenId::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl From<Option<u64>> for TokenId {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(id) => TokenId::Id(id),
            None => TokenId::Unknown,
        }
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenId::Id(id) => write!(f, "{}", id),
            TokenId::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of the on-chain transaction as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStatus {
    Success,
    Failed,
}

/// Everything worth keeping about one mint run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRecord {
    pub contract_address: Address,
    pub owner: Address,
    pub token_id: TokenId,
    pub token_uri: String,
    pub image_ipfs_hash: String,
    pub metadata_ipfs_hash: String,
    pub name: String,
    pub description: String,
    pub original_image_path: String,
    pub image_url: String,
    pub metadata_url: String,
    pub edition_size: u64,
    pub mint_time: String,
    pub transaction_hash: Hash,
    pub block_number: u64,
    pub network: String,
    pub status: MintStatus,
}

/// Write the record into `dir` and return the path.
pub fn write_record(record: &MintRecord, dir: &Path) -> io::Result<PathBuf> {
    let mut stamp = Utc::now().timestamp_millis();
    let mut path = dir.join(record_file_name(&record.network, stamp));
    // bump the stamp rather than clobber an earlier record
    while path.exists() {
        stamp += 1;
        path = dir.join(record_file_name(&record.network, stamp));
    }

    let contents = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn record_file_name(network: &str, epoch_millis: i64) -> String {
    format!("edition-nft-mint-{network}-{epoch_millis}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record() -> MintRecord {
        MintRecord {
            contract_address: Address::from_bytes([0x07u8; 20]),
            owner: Address::from_bytes([0xabu8; 20]),
            token_id: TokenId::Id(7),
            token_uri: "ipfs://Qmmeta".to_string(),
            image_ipfs_hash: "Qmimg".to_string(),
            metadata_ipfs_hash: "Qmmeta".to_string(),
            name: "Cat #1".to_string(),
            description: String::new(),
            original_image_path: "cat.png".to_string(),
            image_url: "https://gateway.pinata.cloud/ipfs/Qmimg".to_string(),
            metadata_url: "https://gateway.pinata.cloud/ipfs/Qmmeta".to_string(),
            edition_size: 5,
            mint_time: "2026-08-07T00:00:00+00:00".to_string(),
            transaction_hash: Hash::from_bytes([0x11u8; 32]),
            block_number: 100,
            network: "localhost".to_string(),
            status: MintStatus::Success,
        }
    }

    #[test]
    fn test_record_field_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        for field in [
            "contractAddress",
            "owner",
            "tokenId",
            "tokenUri",
            "imageIpfsHash",
            "metadataIpfsHash",
            "name",
            "description",
            "originalImagePath",
            "imageUrl",
            "metadataUrl",
            "editionSize",
            "mintTime",
            "transactionHash",
            "blockNumber",
            "network",
            "status",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["tokenId"], 7);
        assert_eq!(value["editionSize"], 5);
        assert_eq!(value["status"], "success");
    }

    #[test]
    fn test_unknown_token_id_serializes_as_sentinel() {
        let mut record = sample_record();
        record.token_id = TokenId::from(None);
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["tokenId"], "unknown");
    }

    #[test]
    fn test_write_record_file_name_pattern() {
        let dir = TempDir::new().unwrap();
        let path = write_record(&sample_record(), dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("edition-nft-mint-localhost-"));
        assert!(name.ends_with(".json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["blockNumber"], 100);
    }

    #[test]
    fn test_repeated_writes_never_collide() {
        let dir = TempDir::new().unwrap();
        let record = sample_record();
        let first = write_record(&record, dir.path()).unwrap();
        let second = write_record(&record, dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
    }
}
