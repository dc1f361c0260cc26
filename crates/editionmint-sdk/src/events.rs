//! Decoding of the `EditionCreated` confirmation event.

use editionmint_types::{Address, Hash, TransactionReceipt};

use crate::abi;

/// Canonical signature of the event the contract emits once per minted
/// edition. The token id is the first, indexed argument.
pub const EDITION_CREATED_SIG: &str = "EditionCreated(uint256,address,uint256,string)";

/// Topic identifying `EditionCreated` logs.
pub fn edition_created_topic() -> Hash {
    abi::event_topic(EDITION_CREATED_SIG)
}

/// Scan the receipt's logs in order and return the token id from the first
/// `EditionCreated` entry emitted by `contract`.
///
/// Logs that do not decode - foreign contracts, other events, missing
/// topics, a token id that does not fit - are skipped, not errors: receipts
/// routinely interleave logs from other interfaces. `None` means the event
/// was not found and the token id stays unknown.
pub fn extract_token_id(receipt: &TransactionReceipt, contract: Address) -> Option<u64> {
    let topic = edition_created_topic();

    for entry in &receipt.logs {
        if entry.address != contract {
            continue;
        }
        if entry.topics.first() != Some(&topic) {
            continue;
        }
        let Some(id_topic) = entry.topics.get(1) else {
            continue;
        };
        match abi::decode_u64(id_topic.as_bytes()) {
            Ok(token_id) => return Some(token_id),
            Err(e) => {
                log::debug!("skipping undecodable EditionCreated log: {e}");
                continue;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use editionmint_types::Log;

    fn contract_address() -> Address {
        Address::from_bytes([0x07u8; 20])
    }

    fn uint_topic(value: u64) -> Hash {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Hash::from_bytes(bytes)
    }

    fn edition_created_log(token_id: u64) -> Log {
        Log {
            address: contract_address(),
            topics: vec![edition_created_topic(), uint_topic(token_id)],
            data: vec![],
        }
    }

    fn receipt_with_logs(logs: Vec<Log>) -> TransactionReceipt {
        TransactionReceipt {
            status: true,
            logs,
            ..Default::default()
        }
    }

    #[test]
    fn test_extracts_token_id() {
        let receipt = receipt_with_logs(vec![edition_created_log(7)]);
        assert_eq!(extract_token_id(&receipt, contract_address()), Some(7));
    }

    #[test]
    fn test_first_matching_log_wins() {
        let receipt = receipt_with_logs(vec![edition_created_log(3), edition_created_log(9)]);
        assert_eq!(extract_token_id(&receipt, contract_address()), Some(3));
    }

    #[test]
    fn test_no_logs_is_unknown() {
        let receipt = receipt_with_logs(vec![]);
        assert_eq!(extract_token_id(&receipt, contract_address()), None);
    }

    #[test]
    fn test_foreign_contract_logs_are_skipped() {
        let mut log = edition_created_log(7);
        log.address = Address::from_bytes([0x99u8; 20]);
        let receipt = receipt_with_logs(vec![log]);
        assert_eq!(extract_token_id(&receipt, contract_address()), None);
    }

    #[test]
    fn test_other_events_are_skipped() {
        let transfer = Log {
            address: contract_address(),
            topics: vec![
                abi::event_topic("Transfer(address,address,uint256)"),
                uint_topic(1),
            ],
            data: vec![],
        };
        let receipt = receipt_with_logs(vec![transfer, edition_created_log(7)]);
        assert_eq!(extract_token_id(&receipt, contract_address()), Some(7));
    }

    #[test]
    fn test_undecodable_entries_are_tolerated() {
        // missing the token id topic
        let truncated = Log {
            address: contract_address(),
            topics: vec![edition_created_topic()],
            data: vec![],
        };
        // token id too large for u64
        let oversized = Log {
            address: contract_address(),
            topics: vec![edition_created_topic(), Hash::from_bytes([0xffu8; 32])],
            data: vec![],
        };
        let receipt = receipt_with_logs(vec![truncated, oversized, edition_created_log(42)]);
        assert_eq!(extract_token_id(&receipt, contract_address()), Some(42));
    }
}
