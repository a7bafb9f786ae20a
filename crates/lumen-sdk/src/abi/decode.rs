//! ABI decoding

use lumen_primitives::{Address, U256};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode tokens from ABI-encoded words.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let mut tokens = Vec::with_capacity(types.len());

    for (index, param_type) in types.iter().enumerate() {
        tokens.push(decode_token(param_type, data, index * 32)?);
    }

    Ok(tokens)
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], SdkError> {
    data.get(offset..offset + 32)
        .ok_or_else(|| SdkError::AbiDecode(format!("truncated word at offset {offset}")))
}

fn decode_token(param_type: &ParamType, data: &[u8], offset: usize) -> Result<Token, SdkError> {
    match param_type {
        ParamType::Address => {
            let word = word_at(data, offset)?;
            if word[..12].iter().any(|&b| b != 0) {
                return Err(SdkError::AbiDecode("dirty address padding".to_string()));
            }
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&word[12..32]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word_at(data, offset)?);
            if *bits < 256 && value.bits() > *bits {
                return Err(SdkError::AbiDecode(format!(
                    "value does not fit uint{bits}"
                )));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Bool => {
            let word = word_at(data, offset)?;
            match word[31] {
                0 if word[..31].iter().all(|&b| b == 0) => Ok(Token::Bool(false)),
                1 if word[..31].iter().all(|&b| b == 0) => Ok(Token::Bool(true)),
                _ => Err(SdkError::AbiDecode("invalid boolean word".to_string())),
            }
        }
        ParamType::FixedBytes(size) => {
            let word = word_at(data, offset)?;
            Ok(Token::FixedBytes(word[..*size].to_vec()))
        }
        ParamType::Bytes => Ok(Token::Bytes(decode_bytes(data, offset)?)),
        ParamType::String => {
            let bytes = decode_bytes(data, offset)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::AbiDecode(format!("invalid UTF-8: {e}")))?;
            Ok(Token::String(s))
        }
    }
}

/// Follow a head offset into the tail and read a length-prefixed byte run.
fn decode_bytes(data: &[u8], head_offset: usize) -> Result<Vec<u8>, SdkError> {
    let tail_offset = U256::from_big_endian(word_at(data, head_offset)?);
    if tail_offset > U256::from(data.len()) {
        return Err(SdkError::AbiDecode("offset past end of data".to_string()));
    }
    let tail_offset = tail_offset.low_u64() as usize;

    let length = U256::from_big_endian(word_at(data, tail_offset)?);
    if length > U256::from(data.len()) {
        return Err(SdkError::AbiDecode("length past end of data".to_string()));
    }
    let length = length.low_u64() as usize;

    data.get(tail_offset + 32..tail_offset + 32 + length)
        .map(|bytes| bytes.to_vec())
        .ok_or_else(|| SdkError::AbiDecode("truncated dynamic content".to_string()))
}
