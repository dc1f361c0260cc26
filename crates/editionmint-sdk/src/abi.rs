//! Minimal Solidity ABI support.
//!
//! Covers exactly the shapes the editions contract exposes: selector and
//! event-topic computation (keccak-256), head/tail encoding of
//! `address` / `uint256` / `string` arguments, and single-word decoding of
//! return values.

use editionmint_types::{Address, Hash};
use sha3::{Digest, Keccak256};

use crate::errors::{Result, SdkError};

/// ABI word size in bytes.
const WORD: usize = 32;

/// A single encodable call argument.
#[derive(Debug, Clone)]
pub enum Token {
    Address(Address),
    Uint(u64),
    Str(String),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::Str(_))
    }
}

/// keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 4-byte function selector for a canonical signature, e.g. `"owner()"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Log topic for a canonical event signature,
/// e.g. `"Transfer(address,address,uint256)"`.
pub fn event_topic(signature: &str) -> Hash {
    Hash::from_bytes(keccak256(signature.as_bytes()))
}

/// Encode a function call: selector followed by head/tail encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + args.len() * WORD);
    out.extend_from_slice(&selector(signature));

    let head_len = args.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        if arg.is_dynamic() {
            head.extend_from_slice(&uint_word((head_len + tail.len()) as u64));
        }
        match arg {
            Token::Address(addr) => head.extend_from_slice(&address_word(addr)),
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::Str(s) => {
                tail.extend_from_slice(&uint_word(s.len() as u64));
                tail.extend_from_slice(s.as_bytes());
                let rem = s.len() % WORD;
                if rem != 0 {
                    tail.extend(std::iter::repeat(0u8).take(WORD - rem));
                }
            }
        }
    }

    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    out
}

/// Decode a returned `address` from call output.
pub fn decode_address(output: &[u8]) -> Result<Address> {
    if output.len() < WORD {
        return Err(SdkError::Abi(format!(
            "address return too short: {} bytes",
            output.len()
        )));
    }
    Address::from_slice(&output[12..32]).map_err(|e| SdkError::Abi(e.to_string()))
}

/// Decode a single `uint256` word into a u64. Fails if the value does not
/// fit, which callers treat as "does not decode".
pub fn decode_u64(word: &[u8]) -> Result<u64> {
    if word.len() != WORD {
        return Err(SdkError::Abi(format!(
            "expected a 32-byte word, got {} bytes",
            word.len()
        )));
    }
    if word[..24].iter().any(|&b| b != 0) {
        return Err(SdkError::Abi("uint256 does not fit in u64".to_string()));
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[24..32]);
    Ok(u64::from_be_bytes(bytes))
}

fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(addr: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(addr.as_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(selector("owner()"), [0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_known_event_topic() {
        let topic = event_topic("Transfer(address,address,uint256)");
        assert_eq!(
            topic.to_string(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_encode_static_args() {
        let addr = Address::from_bytes([0x11u8; 20]);
        let encoded = encode_call(
            "transfer(address,uint256)",
            &[Token::Address(addr), Token::Uint(5)],
        );

        assert_eq!(encoded.len(), 4 + 64);
        assert_eq!(&encoded[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        // address right-aligned in the first word
        assert_eq!(&encoded[4..16], &[0u8; 12]);
        assert_eq!(&encoded[16..36], addr.as_bytes());
        // uint in the second word
        assert_eq!(encoded[4 + 63], 5);
    }

    #[test]
    fn test_encode_dynamic_args() {
        let addr = Address::from_bytes([0x11u8; 20]);
        let encoded = encode_call(
            "f(address,uint256,string,string)",
            &[
                Token::Address(addr),
                Token::Uint(5),
                Token::Str("ab".to_string()),
                Token::Str(String::new()),
            ],
        );

        let args = &encoded[4..];
        // head: 4 words; "ab" sits right after the head, "" after its two words
        assert_eq!(decode_u64(&args[64..96]).unwrap(), 128);
        assert_eq!(decode_u64(&args[96..128]).unwrap(), 192);
        // "ab" tail: length word + padded content
        assert_eq!(decode_u64(&args[128..160]).unwrap(), 2);
        assert_eq!(&args[160..162], b"ab");
        assert!(args[162..192].iter().all(|&b| b == 0));
        // "" tail: length word only
        assert_eq!(decode_u64(&args[192..224]).unwrap(), 0);
        assert_eq!(args.len(), 224);
    }

    #[test]
    fn test_decode_address() {
        let mut output = [0u8; 32];
        output[12..].copy_from_slice(&[0xabu8; 20]);
        assert_eq!(
            decode_address(&output).unwrap(),
            Address::from_bytes([0xabu8; 20])
        );
        assert!(decode_address(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_decode_u64_overflow() {
        let mut word = [0u8; 32];
        word[0] = 1;
        assert!(decode_u64(&word).is_err());

        let word = uint_word(7);
        assert_eq!(decode_u64(&word).unwrap(), 7);
    }
}
