//! Scalar contract ABI coding
//!
//! Covers the scalar slice of the ABI: address, uint, bool, fixed bytes,
//! dynamic bytes, and string, with the standard 32-byte word layout and
//! head/tail placement for the dynamic two. Encoding is strict: a token
//! that does not fit the declared parameter type is an error, never a
//! coercion. That strictness is what lets overload resolution work by
//! trial encoding.
//!
//! Nested arrays and tuples are not supported.

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, event_topic, function_selector, parse_type};
pub use types::{ParamType, Token};
