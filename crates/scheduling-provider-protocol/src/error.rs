//! Error types for protocol operations
//!
//! Provides error types for decoding inbound and upstream payloads.

use std::fmt;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while decoding a wire payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload is not syntactically valid JSON
    InvalidJson(String),

    /// Payload is valid JSON but does not match the expected document shape
    UnexpectedShape(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(msg) => write!(f, "invalid JSON: {}", msg),
            Self::UnexpectedShape(msg) => write!(f, "unexpected document shape: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::UnexpectedShape(err.to_string()),
            _ => Self::InvalidJson(err.to_string()),
        }
    }
}
