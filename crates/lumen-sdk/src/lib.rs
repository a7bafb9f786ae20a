//! # lumen-sdk
//!
//! Client-side building blocks: the [`Wallet`] key holder, scalar contract
//! ABI coding, and overload resolution for same-name contract functions and
//! events.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod contract;
mod error;
mod overload;
mod wallet;

pub use contract::{Contract, EventDef, FunctionDef};
pub use error::SdkError;
pub use overload::{EventOverride, MethodOverride, OverloadError};
pub use wallet::Wallet;
