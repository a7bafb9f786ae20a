//! Base32 checksum address codec
//!
//! Human-facing address text of the form `NET:payload‖checksum` (or the long
//! form `NET:TYPE.<TAG>:payload‖checksum`): a version byte plus the 20-byte
//! address payload repacked into 5-bit groups, protected by a 40-bit
//! polynomial checksum over the network tag and payload symbols.
//!
//! Decoding and checksum verification are independent operations:
//! [`ChecksumAddress::to_address`] enforces only structural rules (version
//! byte, padding bits), while [`ChecksumAddress::is_valid`] is the checksum
//! predicate.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::address::{Address, AddressType};

/// The 32-symbol alphabet. Ambiguous characters (I, L, O, Q) are excluded.
const ALPHABET: &[u8; 32] = b"ABCDEFGHJKMNPRSTUVWXYZ0123456789";

/// Version byte prepended to the payload before bit repacking.
/// Value 0 means "20-byte payload"; no other version is defined.
const VERSION_BYTE: u8 = 0;

/// polyMod generator constants, applied per high bit of the 40-bit state.
const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Checksum address codec error
#[derive(Debug, Error)]
pub enum Base32Error {
    /// Network tag not of the form MAIN, TEST, or NET<id>
    #[error("invalid network tag: {0:?}")]
    InvalidNetName(String),
    /// Text does not match the `net:payload‖checksum` grammar
    #[error("malformed checksum address text: {0:?}")]
    InvalidFormat(String),
    /// Character outside the base32 alphabet
    #[error("invalid base32 symbol {0:?}")]
    InvalidSymbol(char),
    /// Nonzero bits left over after bit-group conversion
    #[error("nonzero padding bits after base32 unpacking")]
    NonzeroPadding,
    /// Leftover bits do not fit a full output group
    #[error("excess bits after base32 unpacking")]
    ExcessBits,
    /// Version byte other than 0 after unpacking
    #[error("unsupported address version byte {0}")]
    UnsupportedVersion(u8),
    /// Payload classifies to no known account type
    #[error("unknown address prefix in payload")]
    UnknownAddressType,
}

/// Repack a byte sequence from `in_bits`-wide groups to `out_bits`-wide
/// groups, most significant bits first.
///
/// With `pad`, a final partial group is zero-filled and emitted. Without
/// `pad`, leftover bits must be zero and narrower than one input group, or
/// the conversion fails; this is what rejects corrupt base32 payloads.
pub fn convert_bits(data: &[u8], in_bits: u32, out_bits: u32, pad: bool) -> Result<Vec<u8>, Base32Error> {
    let mask: u32 = (1 << out_bits) - 1;
    let mut out = Vec::with_capacity(data.len() * in_bits as usize / out_bits as usize + 1);

    let mut bits: u32 = 0;
    let mut value: u32 = 0;
    for &byte in data {
        bits += in_bits;
        value = (value << in_bits) | byte as u32;

        while bits >= out_bits {
            bits -= out_bits;
            out.push(((value >> bits) & mask) as u8);
        }
    }
    value = (value << (out_bits - bits)) & mask;

    if bits > 0 && pad {
        out.push(value as u8);
    } else if value != 0 && !pad {
        return Err(Base32Error::NonzeroPadding);
    } else if bits >= in_bits && !pad {
        return Err(Base32Error::ExcessBits);
    }

    Ok(out)
}

/// 40-bit polynomial remainder over 5-bit symbols.
///
/// Shift-and-conditional-XOR recurrence seeded at 1, with the final state
/// XORed with 1. A symbol stream whose trailing 8 symbols are the checksum
/// of its prefix reduces to exactly zero.
pub fn poly_mod(symbols: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in symbols {
        let high = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ d as u64;
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if (high >> bit) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn symbol_index(c: u8) -> Result<u8, Base32Error> {
    ALPHABET
        .iter()
        .position(|&a| a == c)
        .map(|i| i as u8)
        .ok_or(Base32Error::InvalidSymbol(c as char))
}

fn render_symbols(groups: &[u8]) -> String {
    groups.iter().map(|&g| ALPHABET[g as usize] as char).collect()
}

fn parse_symbols(text: &str) -> Result<Vec<u8>, Base32Error> {
    text.bytes().map(symbol_index).collect()
}

fn check_net_name(name: &str) -> Result<(), Base32Error> {
    let valid = match name {
        "MAIN" | "TEST" => true,
        _ => {
            name.len() > 3
                && name.starts_with("NET")
                && name[3..].bytes().all(|b| b.is_ascii_digit())
        }
    };
    if valid {
        Ok(())
    } else {
        Err(Base32Error::InvalidNetName(name.to_string()))
    }
}

/// A checksum-protected, human-readable address.
///
/// Canonical text is uppercase; parsing is case-insensitive. The address
/// type tag is informational metadata derived from the payload, not part of
/// the checksummed content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecksumAddress {
    net_name: String,
    address_type: AddressType,
    payload: String,  // 34 base32 symbols
    checksum: String, // 8 base32 symbols
}

impl ChecksumAddress {
    /// Encode a 20-byte address for the given network tag.
    pub fn from_address(address: &Address, net_name: &str) -> Result<Self, Base32Error> {
        let net_name = net_name.to_ascii_uppercase();
        check_net_name(&net_name)?;

        let address_type = address
            .address_type()
            .map_err(|_| Base32Error::UnknownAddressType)?;

        let mut versioned = Vec::with_capacity(21);
        versioned.push(VERSION_BYTE);
        versioned.extend_from_slice(address.as_bytes());
        let payload5 = convert_bits(&versioned, 8, 5, true)?;

        let mut input: Vec<u8> = net_name.bytes().map(|b| b & 0x1f).collect();
        input.push(0);
        input.extend_from_slice(&payload5);
        input.extend_from_slice(&[0u8; 8]); // checksum placeholder
        let checksum = poly_mod(&input);

        let checksum_bytes = &checksum.to_be_bytes()[3..]; // low 5 bytes, 40 bits
        let checksum5 = convert_bits(checksum_bytes, 8, 5, true)?;

        Ok(Self {
            net_name,
            address_type,
            payload: render_symbols(&payload5),
            checksum: render_symbols(&checksum5),
        })
    }

    /// Parse the simple form `net:payload‖checksum`, deriving the address
    /// type from the payload bytes.
    pub fn from_simple(text: &str) -> Result<Self, Base32Error> {
        let upper = text.to_ascii_uppercase();
        let (net_name, body) = upper
            .split_once(':')
            .ok_or_else(|| Base32Error::InvalidFormat(text.to_string()))?;
        if body.contains(':') {
            return Err(Base32Error::InvalidFormat(text.to_string()));
        }
        Self::assemble(net_name, None, body, text)
    }

    fn assemble(
        net_name: &str,
        type_tag: Option<&str>,
        body: &str,
        original: &str,
    ) -> Result<Self, Base32Error> {
        check_net_name(net_name)?;
        if body.len() != 42 || !body.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(Base32Error::InvalidFormat(original.to_string()));
        }
        let (payload, checksum) = body.split_at(34);

        let mut parsed = Self {
            net_name: net_name.to_string(),
            address_type: AddressType::Null,
            payload: payload.to_string(),
            checksum: checksum.to_string(),
        };

        parsed.address_type = match type_tag {
            Some(tag) => AddressType::from_tag(tag)
                .ok_or_else(|| Base32Error::InvalidFormat(original.to_string()))?,
            // No tag in the simple form: classify from the decoded payload.
            None => parsed
                .to_address()?
                .address_type()
                .map_err(|_| Base32Error::UnknownAddressType)?,
        };

        Ok(parsed)
    }

    /// Verify the checksum.
    ///
    /// Recomputes polyMod with the checksum symbols included in place of the
    /// placeholder; the text is intact iff the remainder is exactly zero.
    pub fn is_valid(&self) -> bool {
        let payload5 = match parse_symbols(&self.payload) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let checksum5 = match parse_symbols(&self.checksum) {
            Ok(v) => v,
            Err(_) => return false,
        };

        let mut input: Vec<u8> = self.net_name.bytes().map(|b| b & 0x1f).collect();
        input.push(0);
        input.extend_from_slice(&payload5);
        input.extend_from_slice(&checksum5);

        poly_mod(&input) == 0
    }

    /// Recover the 20-byte payload.
    ///
    /// Fails on a nonzero version byte or nonzero padding bits; does **not**
    /// verify the checksum.
    pub fn to_address(&self) -> Result<Address, Base32Error> {
        let payload5 = parse_symbols(&self.payload)?;
        let bytes = convert_bits(&payload5, 5, 8, false)?;

        let (&version, address_bytes) = bytes
            .split_first()
            .ok_or_else(|| Base32Error::InvalidFormat(self.to_string()))?;
        if version != VERSION_BYTE {
            return Err(Base32Error::UnsupportedVersion(version));
        }

        Address::from_slice(address_bytes).map_err(|_| Base32Error::InvalidFormat(self.to_string()))
    }

    /// Payload as canonical lowercase data hex.
    pub fn to_hex(&self) -> Result<String, Base32Error> {
        Ok(self.to_address()?.to_hex())
    }

    /// The network tag (canonical uppercase).
    pub fn net_name(&self) -> &str {
        &self.net_name
    }

    /// The informational account-type tag.
    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    /// The 34 payload symbols.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The 8 checksum symbols.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Lowercase simple projection `net:payload‖checksum`.
    pub fn to_simple(&self) -> String {
        format!("{}:{}{}", self.net_name, self.payload, self.checksum).to_ascii_lowercase()
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:TYPE.{}:{}{}",
            self.net_name,
            self.address_type.tag(),
            self.payload,
            self.checksum
        )
    }
}

impl FromStr for ChecksumAddress {
    type Err = Base32Error;

    /// Parse the long form `net:TYPE.<TAG>:payload‖checksum`
    /// (case-insensitive). Use [`ChecksumAddress::from_simple`] for the
    /// tagless form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let mut parts = upper.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(net_name), Some(middle), Some(body), None) => {
                let tag = middle
                    .strip_prefix("TYPE.")
                    .ok_or_else(|| Base32Error::InvalidFormat(s.to_string()))?;
                Self::assemble(net_name, Some(tag), body, s)
            }
            _ => Err(Base32Error::InvalidFormat(s.to_string())),
        }
    }
}
