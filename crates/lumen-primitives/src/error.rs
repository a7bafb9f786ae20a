//! Common error types for primitives

use crate::address::AddressError;
use crate::base32::Base32Error;
use crate::hash::HashError;
use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Hash error
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    /// Checksum address error
    #[error("base32 address error: {0}")]
    Base32(#[from] Base32Error),
}
