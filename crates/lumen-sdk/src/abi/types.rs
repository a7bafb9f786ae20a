//! ABI type definitions

use lumen_primitives::{Address, H256, U256};
use std::fmt;

/// A scalar ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
}

impl Token {
    /// Create an address token
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// Create a uint token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create a bool token
    pub fn bool(value: bool) -> Self {
        Token::Bool(value)
    }

    /// Create a bytes32 token
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Create a dynamic bytes token
    pub fn bytes(data: Vec<u8>) -> Self {
        Token::Bytes(data)
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }
}

/// A scalar ABI parameter type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
}

impl ParamType {
    /// Whether the value lives in the tail with an offset in the head.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::String)
    }

    /// Whether `token` is acceptable for this parameter type.
    ///
    /// Strict: a `Uint` must fit the declared bit width, `FixedBytes` must
    /// have exactly the declared length, nothing is coerced.
    pub fn matches(&self, token: &Token) -> bool {
        match (self, token) {
            (ParamType::Address, Token::Address(_)) => true,
            (ParamType::Uint(bits), Token::Uint(value)) => {
                *bits >= 256 || value.bits() <= *bits
            }
            (ParamType::Bool, Token::Bool(_)) => true,
            (ParamType::FixedBytes(size), Token::FixedBytes(data)) => data.len() == *size,
            (ParamType::Bytes, Token::Bytes(_)) => true,
            (ParamType::String, Token::String(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::FixedBytes(size) => write!(f, "bytes{size}"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
        }
    }
}
