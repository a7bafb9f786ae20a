//! # lumen-rlp
//!
//! Recursive length prefix (RLP) encoding for the Lumen SDK, built on the
//! `rlp` crate with helpers for the shapes the transaction codec needs:
//! minimal-big-endian integers, optional recipient addresses, and 32-byte
//! signature scalars.
//!
//! ## Encoding rules
//!
//! - Single byte `[0x00, 0x7f]`: itself
//! - Short string (0-55 bytes): `0x80 + len` + data
//! - Long string (>55 bytes): `0xb7 + len_of_len` + len + data
//! - Short list (0-55 bytes payload): `0xc0 + len` + items
//! - Long list (>55 bytes payload): `0xf7 + len_of_len` + len + items

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

pub use lumen_primitives::{Address, H256, U256};

/// Encode a value to RLP bytes
pub fn encode<T: Encodable>(value: &T) -> Vec<u8> {
    rlp::encode(value).to_vec()
}

/// Decode RLP bytes to a value
pub fn decode<T: Decodable>(data: &[u8]) -> Result<T, DecoderError> {
    rlp::decode(data)
}

/// Encoding helpers for transaction fields
pub mod utils {
    use super::*;
    use bytes::Bytes;

    /// Minimal big-endian bytes of a 32-byte scalar: leading zero bytes
    /// stripped, the zero scalar is empty.
    pub fn scalar_bytes(scalar: &[u8; 32]) -> &[u8] {
        let start = scalar.iter().position(|&b| b != 0).unwrap_or(32);
        &scalar[start..]
    }

    /// Append a 32-byte scalar in its minimal form (zero appends the empty
    /// byte string).
    pub fn append_scalar(stream: &mut RlpStream, scalar: &[u8; 32]) {
        stream.append(&scalar_bytes(scalar).to_vec());
    }

    /// Read a scalar at `index`, left-padded back to 32 bytes.
    pub fn scalar_at(rlp: &Rlp<'_>, index: usize) -> Result<[u8; 32], DecoderError> {
        let bytes: Vec<u8> = rlp.val_at(index)?;
        if bytes.len() > 32 {
            return Err(DecoderError::RlpIsTooBig);
        }
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }

    /// Append an optional recipient: a missing address (contract creation)
    /// appends the empty byte string.
    pub fn append_optional_address(stream: &mut RlpStream, address: Option<&Address>) {
        match address {
            Some(address) => stream.append(address),
            None => stream.append_empty_data(),
        };
    }

    /// Read an optional recipient at `index`: empty data is `None`,
    /// 20 bytes is an address, any other length is invalid.
    pub fn optional_address_at(
        rlp: &Rlp<'_>,
        index: usize,
    ) -> Result<Option<Address>, DecoderError> {
        let bytes: Vec<u8> = rlp.val_at(index)?;
        match bytes.len() {
            0 => Ok(None),
            20 => {
                let mut arr = [0u8; 20];
                arr.copy_from_slice(&bytes);
                Ok(Some(Address::from_bytes(arr)))
            }
            _ => Err(DecoderError::RlpInvalidLength),
        }
    }

    /// Append an opaque payload.
    pub fn append_bytes(stream: &mut RlpStream, data: &Bytes) {
        stream.append(&data.to_vec());
    }

    /// Read an opaque payload at `index`.
    pub fn bytes_at(rlp: &Rlp<'_>, index: usize) -> Result<Bytes, DecoderError> {
        let bytes: Vec<u8> = rlp.val_at(index)?;
        Ok(Bytes::from(bytes))
    }
}
