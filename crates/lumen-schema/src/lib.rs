//! # lumen-schema
//!
//! A small combinator engine for validating and normalizing
//! [`serde_json::Value`] trees.
//!
//! A [`Schema`] is an immutable rule. Combinators ([`Schema::parse`],
//! [`Schema::validate`], [`Schema::or`], [`Schema::default`]) each return a
//! new `Schema`; existing rules are never mutated, so shared sub-rules can be
//! composed freely.
//!
//! ```
//! use lumen_schema::Schema;
//! use serde_json::json;
//!
//! let positive = Schema::any().validate("positive number", |v| {
//!     v.as_u64().map(|n| n > 0).unwrap_or(false)
//! });
//! assert_eq!(positive.apply(&json!(3)).unwrap(), json!(3));
//! assert!(positive.apply(&json!(0)).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod schema;

pub use error::{Path, Segment, ValidationError};
pub use schema::Schema;
