//! Validation error with a path to the offending value

use std::fmt;
use thiserror::Error;

/// One step into a JSON tree: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Object field name
    Key(String),
    /// Array element index
    Index(usize),
}

/// Location of a failure inside the input tree, outermost segment first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(pub Vec<Segment>);

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A rule rejected (part of) the input.
///
/// `value` holds a rendering of the rejected value at `path`, not the whole
/// input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{path}: {message}, got {value}")]
pub struct ValidationError {
    /// Where in the input the failure occurred
    pub path: Path,
    /// What the failing rule reported
    pub message: String,
    /// Rendering of the rejected value
    pub value: String,
}

impl ValidationError {
    /// Error at the current position (empty path).
    pub fn new(message: impl Into<String>, value: &serde_json::Value) -> Self {
        ValidationError {
            path: Path::default(),
            message: message.into(),
            value: value.to_string(),
        }
    }

    /// Prepend a segment as the error propagates out of a container.
    pub fn nest(mut self, segment: Segment) -> Self {
        self.path.0.insert(0, segment);
        self
    }
}
