//! # lumen-primitives
//!
//! Primitive types for the Lumen SDK.
//!
//! Provides the 20-byte [`Address`] with its account-type classification,
//! the [`H256`] hash type, and the base32 checksum address codec used for
//! human-facing address text.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
pub mod base32;
mod error;
mod hash;

pub use address::{Address, AddressError, AddressType};
pub use base32::{Base32Error, ChecksumAddress};
pub use error::PrimitiveError;
pub use hash::{Hash, HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;
