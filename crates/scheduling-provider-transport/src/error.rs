//! Transport error types

use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
#[derive(Debug)]
pub enum TransportError {
    /// The peer could not be reached
    Connection(String),

    /// No response arrived before the configured timeout
    Timeout,

    /// Headers arrived but the body could not be read to the end
    Body(String),

    /// Request could not be built or sent for another reason
    Http(String),

    /// Client construction failed
    Client(String),
}

impl TransportError {
    /// True when the failure happened before any response was received.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Timeout => write!(f, "Timeout"),
            Self::Body(msg) => write!(f, "Body error: {}", msg),
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Client(msg) => write!(f, "Client error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
