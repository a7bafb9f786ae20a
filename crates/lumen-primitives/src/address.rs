//! 20-byte account address with protocol account-type classification

use std::fmt;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
    /// High nibble does not map to a known account type
    #[error("unknown address prefix 0x{0:02x}")]
    UnknownPrefix(u8),
}

/// Account category encoded in the high nibble of the first address byte.
///
/// The all-zero address is its own category; every other address is
/// classified by its top four bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// The all-zero address
    Null,
    /// Built-in (precompiled) contract, prefix `0x0_`
    Builtin,
    /// Externally owned account, prefix `0x1_`
    User,
    /// Deployed contract, prefix `0x8_`
    Contract,
}

impl AddressType {
    /// Canonical uppercase tag used in long-form checksum address text
    pub fn tag(&self) -> &'static str {
        match self {
            AddressType::Null => "NULL",
            AddressType::Builtin => "BUILTIN",
            AddressType::User => "USER",
            AddressType::Contract => "CONTRACT",
        }
    }

    /// Parse a long-form tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "NULL" => Some(AddressType::Null),
            "BUILTIN" => Some(AddressType::Builtin),
            "USER" => Some(AddressType::User),
            "CONTRACT" => Some(AddressType::Contract),
            _ => None,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// 20-byte account address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != 20 {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Classify the address by its high nibble.
    ///
    /// The all-zero address is [`AddressType::Null`]; otherwise the top four
    /// bits of the first byte select the category. Any other prefix is
    /// rejected: such addresses cannot appear on the network.
    pub fn address_type(&self) -> Result<AddressType, AddressError> {
        if self.is_zero() {
            return Ok(AddressType::Null);
        }
        match self.0[0] & 0xf0 {
            0x00 => Ok(AddressType::Builtin),
            0x10 => Ok(AddressType::User),
            0x80 => Ok(AddressType::Contract),
            _ => Err(AddressError::UnknownPrefix(self.0[0])),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// RLP implementation (behind feature flag)
#[cfg(feature = "rlp")]
mod rlp_impl {
    use super::*;
    use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

    impl Encodable for Address {
        fn rlp_append(&self, s: &mut RlpStream) {
            s.encoder().encode_value(&self.0);
        }
    }

    impl Decodable for Address {
        fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
            let bytes: Vec<u8> = rlp.as_val()?;
            if bytes.len() != 20 {
                return Err(DecoderError::RlpInvalidLength);
            }
            let mut arr = [0u8; 20];
            arr.copy_from_slice(&bytes);
            Ok(Address(arr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Basic functionality tests ====================

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        assert!(!addr.is_zero());

        let addr2 = Address::from_hex("1123456789012345678901234567890123456789").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::ZERO;
        assert!(zero.is_zero());
        assert_eq!(zero.to_hex(), "0x0000000000000000000000000000000000000000");
    }

    #[test]
    fn test_address_case_insensitive_parse() {
        let lower = Address::from_hex("0x1abcdefabcdefabcdefabcdefabcdefabcdefabc").unwrap();
        let upper = Address::from_hex("0x1ABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABC").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_hex(), "0x1abcdefabcdefabcdefabcdefabcdefabcdefabc");
    }

    #[test]
    fn test_address_from_hex_invalid_chars() {
        let result = Address::from_hex("0x1123456789012345678901234567890123456zzz");
        assert!(matches!(result, Err(AddressError::InvalidHex(_))));
    }

    #[test]
    fn test_address_length_bounds() {
        // 19 bytes
        assert!(matches!(
            Address::from_hex("0x11234567890123456789012345678901234567"),
            Err(AddressError::InvalidLength(19))
        ));
        // 21 bytes
        assert!(matches!(
            Address::from_hex("0x112345678901234567890123456789012345678900"),
            Err(AddressError::InvalidLength(21))
        ));
        assert!(matches!(
            Address::from_slice(&[]),
            Err(AddressError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_address_roundtrip() {
        let original = "0x1123456789012345678901234567890123456789";
        let addr = Address::from_hex(original).unwrap();
        assert_eq!(addr.to_hex(), original);
    }

    // ==================== Address type classification ====================

    #[test]
    fn test_type_null() {
        assert_eq!(Address::ZERO.address_type().unwrap(), AddressType::Null);
    }

    #[test]
    fn test_type_builtin() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0x01;
        let addr = Address::from_bytes(bytes);
        assert_eq!(addr.address_type().unwrap(), AddressType::Builtin);
    }

    #[test]
    fn test_type_user() {
        let addr = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        assert_eq!(addr.address_type().unwrap(), AddressType::User);
    }

    #[test]
    fn test_type_contract() {
        let addr = Address::from_hex("0x8123456789012345678901234567890123456789").unwrap();
        assert_eq!(addr.address_type().unwrap(), AddressType::Contract);
    }

    #[test]
    fn test_type_unknown_prefix() {
        let addr = Address::from_hex("0xf123456789012345678901234567890123456789").unwrap();
        assert!(matches!(
            addr.address_type(),
            Err(AddressError::UnknownPrefix(0xf1))
        ));
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(AddressType::User.tag(), "USER");
        assert_eq!(AddressType::from_tag("contract"), Some(AddressType::Contract));
        assert_eq!(AddressType::from_tag("bogus"), None);
    }

    // ==================== Equality and hash tests ====================

    #[test]
    fn test_address_equality_and_hash() {
        use std::collections::HashSet;

        let a = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let b = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let c = Address::from_hex("0x0000000000000000000000000000000000000001").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_address_debug() {
        let addr = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let debug = format!("{:?}", addr);
        assert!(debug.contains("Address(0x1123456789012345678901234567890123456789)"));
    }
}
