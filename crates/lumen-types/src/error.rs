//! Transaction errors

use lumen_crypto::CryptoError;
use lumen_primitives::Address;
use thiserror::Error;

/// Transaction codec/signing error
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Operation requires a signed transaction
    #[error("transaction is not signed")]
    Unsigned,

    /// The signing key does not belong to the declared sender
    #[error("sender mismatch: transaction declares {declared}, key derives {derived}")]
    SenderMismatch {
        /// Sender already set on the transaction
        declared: Address,
        /// Sender derived from the signing key
        derived: Address,
    },

    /// The v value does not fit the transaction's chain id
    #[error("invalid v value {v} for chain id {chain_id}")]
    InvalidV {
        /// The stored v value
        v: u64,
        /// The transaction's chain id
        chain_id: u64,
    },

    /// Underlying cryptographic failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Malformed RLP input
    #[error("rlp decoding failed: {0}")]
    Decode(#[from] lumen_rlp::DecoderError),
}
