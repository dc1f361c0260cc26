use crate::error::TypesError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 20-byte account or contract address.
///
/// Parsing accepts hex in any letter case, with or without a `0x` prefix, so
/// two spellings of the same address always compare equal as bytes. Display
/// is lowercase hex with the `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);
    pub const LEN: usize = 20;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != 20 {
            return Err(TypesError::InvalidAddressLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Convert to hex string without 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(TypesError::InvalidAddressFormat(s.to_string()));
        }
        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero() {
        assert_eq!(Address::ZERO.as_bytes(), &[0u8; 20]);
        assert!(Address::ZERO.is_zero());
    }

    #[test]
    fn test_address_from_bytes() {
        let bytes = [1u8; 20];
        let addr = Address::from_bytes(bytes);
        assert_eq!(addr.as_bytes(), &bytes);
    }

    #[test]
    fn test_address_hex_roundtrip() {
        let bytes = [0xabu8; 20];
        let addr = Address::from_bytes(bytes);

        let hex = addr.to_string();
        assert!(hex.starts_with("0x"));
        let parsed: Address = hex.parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_address_parse_is_case_insensitive() {
        let lower: Address = "0x07f6b926ecb7cb8d2908928db7b66b53cea7745b".parse().unwrap();
        let mixed: Address = "0x07f6B926Ecb7cB8d2908928db7b66B53cEa7745B".parse().unwrap();
        let upper: Address = "0X07F6B926ECB7CB8D2908928DB7B66B53CEA7745B".parse().unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let addr: Address = "07f6b926ecb7cb8d2908928db7b66b53cea7745b".parse().unwrap();
        assert_eq!(addr.to_hex(), "07f6b926ecb7cb8d2908928db7b66b53cea7745b");
    }

    #[test]
    fn test_address_from_str_invalid() {
        assert!(Address::from_str("not hex").is_err());
        assert!(Address::from_str("0x1234").is_err());
        assert!(Address::from_str("").is_err());
    }

    #[test]
    fn test_address_serde_roundtrip() {
        let addr = Address::from_bytes([0x42u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x4242424242424242424242424242424242424242\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
