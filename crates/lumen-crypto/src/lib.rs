//! # lumen-crypto
//!
//! Cryptographic primitives for the Lumen SDK.
//!
//! - Keccak-256 hashing
//! - ECDSA signing/verification (secp256k1)
//! - Public key recovery
//! - Account address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;

pub use error::CryptoError;
pub use hash::keccak256;
pub use signature::{
    private_key_from_hex, public_key_from_bytes, public_key_to_address, public_key_to_bytes,
    recover_public_key, sign, verify, PrivateKey, PublicKey, Signature,
};
