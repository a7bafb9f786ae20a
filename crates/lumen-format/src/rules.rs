//! The quantity and data rules and their fixed-length derivatives

use crate::num::{str_to_u256, to_u256};
use lumen_primitives::U256;
use lumen_schema::{Schema, ValidationError};
use serde_json::Value;

fn u256_to_quantity(n: U256) -> String {
    format!("0x{n:x}")
}

fn u256_to_data(n: U256) -> String {
    let digits = format!("{n:x}");
    if digits.len() % 2 == 0 {
        format!("0x{digits}")
    } else {
        format!("0x0{digits}")
    }
}

/// Render a JSON value as a canonical quantity: minimal lowercase hex with
/// no leading zeros, zero as `0x0`.
pub fn to_quantity(value: &Value) -> Result<String, ValidationError> {
    Ok(u256_to_quantity(to_u256(value)?))
}

fn data_from_str(s: &str) -> Result<String, String> {
    let lowered = s.to_ascii_lowercase();
    let digits = lowered
        .strip_prefix("0x")
        .ok_or_else(|| format!("{s:?} lacks 0x prefix"))?;
    if digits.len() % 2 != 0 {
        return Err(format!("odd-length hex in {s:?}"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("non-hex character in {s:?}"));
    }
    Ok(lowered)
}

fn data_from_array(elements: &[Value]) -> Result<String, String> {
    let mut bytes = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        let byte = element
            .as_u64()
            .filter(|&n| n <= 0xff)
            .ok_or_else(|| format!("element {i} is not a byte"))?;
        bytes.push(byte as u8);
    }
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Render a JSON value as canonical data hex: even-length lowercase, `0x`
/// for empty.
///
/// Accepts hex strings (case-normalized), byte arrays, booleans
/// (`0x00`/`0x01`), null (`0x`), and non-negative integers.
pub fn to_data(value: &Value) -> Result<String, ValidationError> {
    let result = match value {
        Value::Null => Ok("0x".to_string()),
        Value::Bool(false) => Ok("0x00".to_string()),
        Value::Bool(true) => Ok("0x01".to_string()),
        Value::Number(_) => to_u256(value).map(u256_to_data).map_err(|e| e.message),
        Value::String(s) => data_from_str(s),
        Value::Array(elements) => data_from_array(elements),
        other => Err(format!("cannot interpret {other} as bytes")),
    };
    result.map_err(|reason| ValidationError::new(format!("hex: {reason}"), value))
}

/// Decode a data-rule value to raw bytes.
pub fn hex_bytes(value: &Value) -> Result<Vec<u8>, ValidationError> {
    let canonical = to_data(value)?;
    hex::decode(&canonical[2..])
        .map_err(|e| ValidationError::new(format!("hex: {e}"), value))
}

/// The quantity rule as a composable schema. Output is a JSON string.
pub fn quantity() -> Schema {
    Schema::any().parse("quantity", |v| {
        let n = match v {
            // booleans are not numbers here
            Value::Bool(_) => return Err("booleans are not quantities".to_string()),
            Value::String(s) => str_to_u256(s)?,
            Value::Number(_) => to_u256(v).map_err(|e| e.message)?,
            other => return Err(format!("cannot interpret {other} as a quantity")),
        };
        Ok(Value::String(u256_to_quantity(n)))
    })
}

/// The data rule as a composable schema. Output is a JSON string.
pub fn data() -> Schema {
    Schema::any().parse("hex", |v| to_data(v).map(Value::String).map_err(|e| e.message))
}

/// Accepts only JSON booleans, unchanged.
pub fn boolean() -> Schema {
    Schema::any().validate("boolean", |v| v.is_boolean())
}

fn fixed_length_data(name: &'static str, bytes: usize) -> Schema {
    // canonical data hex: "0x" + 2 chars per byte
    let chars = 2 + bytes * 2;
    data().validate(name, move |v| {
        v.as_str().map(|s| s.len() == chars).unwrap_or(false)
    })
}

/// 20-byte data hex (an address in its raw hex form).
pub fn hex40() -> Schema {
    fixed_length_data("hex40", 20)
}

/// Alias for [`hex40`].
pub fn address() -> Schema {
    fixed_length_data("address", 20)
}

/// 32-byte data hex (block hash, transaction hash, private key).
pub fn hex64() -> Schema {
    fixed_length_data("hex64", 32)
}

/// 64-byte data hex (uncompressed public key without prefix).
pub fn public_key() -> Schema {
    fixed_length_data("publicKey", 64)
}

/// A block position: a quantity or one of the `latest` / `pending` /
/// `earliest` labels.
pub fn block_number() -> Schema {
    quantity()
        .or(&Schema::literal(Value::String("latest".to_string())))
        .or(&Schema::literal(Value::String("pending".to_string())))
        .or(&Schema::literal(Value::String("earliest".to_string())))
}
