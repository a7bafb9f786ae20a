//! # lumen-types
//!
//! The wire transaction: RLP codec, signing with replay protection, and
//! sender recovery.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod transaction;

pub use error::TransactionError;
pub use transaction::Transaction;
