//! ABI encoding

use lumen_primitives::{H256, U256};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Encode tokens against their declared parameter types.
///
/// Fails on arity or type mismatch; nothing is coerced.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    if types.len() != tokens.len() {
        return Err(SdkError::AbiEncode(format!(
            "expected {} arguments, got {}",
            types.len(),
            tokens.len()
        )));
    }

    // each parameter occupies one 32-byte head word (scalars inline,
    // dynamic values as an offset)
    let head_size = types.len() * 32;

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(tokens.iter()) {
        if !param_type.matches(token) {
            return Err(SdkError::AbiEncode(format!(
                "token {token:?} does not fit parameter type {param_type}"
            )));
        }
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(u256_word(&U256::from(offset)));
            tail.extend(encode_token(token));
        } else {
            head.extend(encode_token(token));
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode a function call: selector followed by the encoded arguments.
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, SdkError> {
    let mut result = selector.to_vec();
    result.extend(encode(types, tokens)?);
    Ok(result)
}

/// Encode a single type-checked token.
fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(addr) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            buf.to_vec()
        }
        Token::Uint(value) => u256_word(value),
        Token::Bool(b) => {
            let mut buf = [0u8; 32];
            buf[31] = *b as u8;
            buf.to_vec()
        }
        Token::FixedBytes(data) => {
            // left-aligned, zero-padded to the word
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            buf.to_vec()
        }
        Token::Bytes(data) => encode_bytes(data),
        Token::String(s) => encode_bytes(s.as_bytes()),
    }
}

/// Encode a U256 as a 32-byte big-endian word
fn u256_word(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

/// Encode dynamic bytes: length word followed by word-padded content
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = u256_word(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}

/// Compute a function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = lumen_crypto::keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Compute an event's discriminating topic (keccak256 of the signature)
pub fn event_topic(signature: &str) -> H256 {
    lumen_crypto::keccak256(signature.as_bytes())
}

/// Parse a scalar type string (e.g. "uint256", "address", "bytes32")
pub fn parse_type(s: &str) -> Result<ParamType, SdkError> {
    let s = s.trim();

    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("uint") {
        let bits: usize = if rest.is_empty() {
            256
        } else {
            rest.parse()
                .map_err(|_| SdkError::AbiEncode(format!("invalid uint size: {rest}")))?
        };
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(SdkError::AbiEncode(format!("invalid uint size: {bits}")));
        }
        return Ok(ParamType::Uint(bits));
    }

    if let Some(rest) = s.strip_prefix("bytes") {
        let size: usize = rest
            .parse()
            .map_err(|_| SdkError::AbiEncode(format!("invalid bytes size: {rest}")))?;
        if size == 0 || size > 32 {
            return Err(SdkError::AbiEncode(format!("invalid bytes size: {size}")));
        }
        return Ok(ParamType::FixedBytes(size));
    }

    Err(SdkError::AbiEncode(format!("unknown type: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_primitives::Address;

    #[test]
    fn test_encode_address() {
        let addr = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let encoded = encode(&[ParamType::Address], &[Token::Address(addr)]).unwrap();

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[12..32], addr.as_bytes());
        assert!(encoded[..12].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_uint_and_bool() {
        let encoded = encode(&[ParamType::Uint(256)], &[Token::uint(100u64)]).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 100);

        let encoded = encode(&[ParamType::Bool], &[Token::Bool(true)]).unwrap();
        assert_eq!(encoded[31], 1);
    }

    #[test]
    fn test_encode_bytes32() {
        let data = [0x42u8; 32];
        let encoded = encode(
            &[ParamType::FixedBytes(32)],
            &[Token::FixedBytes(data.to_vec())],
        )
        .unwrap();
        assert_eq!(&encoded[..], &data[..]);
    }

    #[test]
    fn test_encode_short_fixed_bytes_left_aligned() {
        let encoded = encode(
            &[ParamType::FixedBytes(4)],
            &[Token::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef])],
        )
        .unwrap();
        assert_eq!(&encoded[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert!(encoded[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_dynamic_bytes_layout() {
        let data = vec![0x01, 0x02, 0x03];
        let encoded = encode(&[ParamType::Bytes], &[Token::Bytes(data.clone())]).unwrap();

        // offset word + length word + one padded content word
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 32);
        assert_eq!(encoded[63], 3);
        assert_eq!(&encoded[64..67], &data[..]);
    }

    #[test]
    fn test_encode_mixed_static_dynamic() {
        let encoded = encode(
            &[ParamType::Uint(256), ParamType::String],
            &[Token::uint(7u64), Token::string("hello")],
        )
        .unwrap();

        // head: uint word + offset word; tail: length + padded "hello"
        assert_eq!(encoded.len(), 128);
        assert_eq!(encoded[31], 7);
        assert_eq!(encoded[63], 64); // offset past the two head words
        assert_eq!(encoded[95], 5); // length
        assert_eq!(&encoded[96..101], b"hello");
    }

    #[test]
    fn test_encode_rejects_mismatch() {
        // a string argument cannot encode as bytes32
        let result = encode(&[ParamType::FixedBytes(32)], &[Token::string("hi")]);
        assert!(matches!(result, Err(SdkError::AbiEncode(_))));

        // uint8 overflow
        let result = encode(&[ParamType::Uint(8)], &[Token::uint(300u64)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_rejects_arity_mismatch() {
        let result = encode(&[ParamType::Bool], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_function_selector_vectors() {
        assert_eq!(
            function_selector("transfer(address,uint256)"),
            [0xa9, 0x05, 0x9c, 0xbb]
        );
        assert_eq!(
            function_selector("balanceOf(address)"),
            [0x70, 0xa0, 0x82, 0x31]
        );
    }

    #[test]
    fn test_event_topic_vector() {
        assert_eq!(
            event_topic("Transfer(address,address,uint256)").to_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_encode_function_call() {
        let to = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let selector = function_selector("transfer(address,uint256)");
        let encoded = encode_function_call(
            selector,
            &[ParamType::Address, ParamType::Uint(256)],
            &[Token::Address(to), Token::uint(1000u64)],
        )
        .unwrap();

        assert_eq!(encoded.len(), 68);
        assert_eq!(&encoded[..4], &selector);
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(parse_type("address").unwrap(), ParamType::Address);
        assert_eq!(parse_type("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(parse_type("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(parse_type("bytes32").unwrap(), ParamType::FixedBytes(32));
        assert_eq!(parse_type("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(parse_type("string").unwrap(), ParamType::String);

        assert!(parse_type("uint7").is_err());
        assert!(parse_type("bytes33").is_err());
        assert!(parse_type("uint256[]").is_err());
        assert!(parse_type("tuple").is_err());
    }
}
