//! SDK error types

use crate::overload::OverloadError;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// ABI encoding error
    #[error("ABI encoding error: {0}")]
    AbiEncode(String),

    /// ABI decoding error
    #[error("ABI decoding error: {0}")]
    AbiDecode(String),

    /// Overload resolution failed
    #[error(transparent)]
    Overload(#[from] OverloadError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] lumen_types::TransactionError),

    /// Request validation error
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] lumen_schema::ValidationError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<lumen_crypto::CryptoError> for SdkError {
    fn from(e: lumen_crypto::CryptoError) -> Self {
        SdkError::SigningFailed(e.to_string())
    }
}

impl From<lumen_primitives::PrimitiveError> for SdkError {
    fn from(e: lumen_primitives::PrimitiveError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}
