//! Overload resolution for same-name functions and events
//!
//! A method group holds every candidate signature sharing one name, in
//! declaration order. Encoding resolves by **trial**: each candidate gets
//! one chance to accept the argument list, and the outcome (accept or
//! reject with reason) is recorded explicitly; control never flows
//! through caught failures. Decoding never trials anything: calldata
//! dispatches by its 4-byte selector, logs by their first topic.

use bytes::Bytes;
use lumen_primitives::H256;
use thiserror::Error;

use crate::abi::Token;
use crate::contract::{EventDef, FunctionDef};
use crate::SdkError;

/// Overload resolution error
#[derive(Debug, Error)]
pub enum OverloadError {
    /// No candidate accepted the argument list
    #[error("no overload of {name} accepts the arguments; tried: {}", .attempts.join("; "))]
    NoMatch {
        /// Function name
        name: String,
        /// Every attempted signature with its rejection reason
        attempts: Vec<String>,
    },

    /// More than one candidate accepted the argument list
    #[error("ambiguous call to {name}; matches: {}", .matches.join(", "))]
    Ambiguous {
        /// Function name
        name: String,
        /// Every matching signature
        matches: Vec<String>,
    },

    /// Calldata selector matches no candidate
    #[error("selector 0x{0} matches no overload")]
    UnknownSelector(String),

    /// Log topic matches no candidate
    #[error("topic {0} matches no event overload")]
    UnknownTopic(String),
}

/// An ordered group of same-name function overloads.
#[derive(Debug, Clone)]
pub struct MethodOverride {
    candidates: Vec<FunctionDef>,
}

impl MethodOverride {
    /// Build a group from candidates; `None` if the list is empty.
    pub fn new(candidates: Vec<FunctionDef>) -> Option<Self> {
        if candidates.is_empty() {
            None
        } else {
            Some(Self { candidates })
        }
    }

    /// The candidates in declaration order.
    pub fn candidates(&self) -> &[FunctionDef] {
        &self.candidates
    }

    /// Encode a call by trial against every candidate.
    ///
    /// Exactly one acceptance yields that candidate's calldata; zero or
    /// several is an [`OverloadError`] naming every signature involved.
    pub fn encode(&self, args: &[Token]) -> Result<Bytes, SdkError> {
        let mut matches: Vec<(usize, Vec<u8>)> = Vec::new();
        let mut attempts: Vec<String> = Vec::new();

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.encode_call(args) {
                Ok(calldata) => matches.push((index, calldata)),
                Err(reason) => attempts.push(format!("{}: {reason}", candidate.signature)),
            }
        }

        match matches.len() {
            0 => Err(OverloadError::NoMatch {
                name: self.candidates[0].name.clone(),
                attempts,
            }
            .into()),
            1 => {
                let (_, calldata) = matches.remove(0);
                Ok(Bytes::from(calldata))
            }
            _ => Err(OverloadError::Ambiguous {
                name: self.candidates[0].name.clone(),
                matches: matches
                    .iter()
                    .map(|(i, _)| self.candidates[*i].signature.clone())
                    .collect(),
            }
            .into()),
        }
    }

    /// Decode calldata by selector dispatch.
    pub fn decode(&self, data: &[u8]) -> Result<(&FunctionDef, Vec<Token>), SdkError> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| SdkError::AbiDecode("calldata shorter than a selector".to_string()))?;

        let candidate = self
            .candidates
            .iter()
            .find(|f| f.selector == selector)
            .ok_or_else(|| OverloadError::UnknownSelector(hex::encode(selector)))?;

        let tokens = candidate.decode_args(&data[4..])?;
        Ok((candidate, tokens))
    }
}

/// An ordered group of same-name event overloads.
#[derive(Debug, Clone)]
pub struct EventOverride {
    candidates: Vec<EventDef>,
}

impl EventOverride {
    /// Build a group from candidates; `None` if the list is empty.
    pub fn new(candidates: Vec<EventDef>) -> Option<Self> {
        if candidates.is_empty() {
            None
        } else {
            Some(Self { candidates })
        }
    }

    /// The candidates in declaration order.
    pub fn candidates(&self) -> &[EventDef] {
        &self.candidates
    }

    /// Decode a log entry by its discriminating first topic.
    pub fn decode_log(&self, topic: &H256, data: &[u8]) -> Result<(&EventDef, Vec<Token>), SdkError> {
        let candidate = self
            .candidates
            .iter()
            .find(|e| &e.topic == topic)
            .ok_or_else(|| OverloadError::UnknownTopic(topic.to_hex()))?;

        let tokens = candidate.decode_data(data)?;
        Ok((candidate, tokens))
    }
}
