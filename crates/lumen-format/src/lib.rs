//! # lumen-format
//!
//! Canonical formatting rules for the two hex families used on the wire:
//!
//! - **quantity**: a number; minimal hex, no leading zeros, zero is `0x0`.
//! - **data**: a byte string; even-length lowercase hex, zero byte is
//!   `0x00`, empty is `0x`.
//!
//! The rules are [`lumen_schema::Schema`] values so they compose into
//! arrays and objects; the plain conversion functions ([`to_u256`],
//! [`to_u64`], [`hex_bytes`]) cover non-JSON call sites.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod num;
mod rpc;
mod rules;

pub use num::{to_u256, to_u64};
pub use rpc::{call_request, log_filter, rpc_transaction};
pub use rules::{
    address, block_number, boolean, data, hex_bytes, hex40, hex64, public_key, quantity,
    to_data, to_quantity,
};
