//! Request decoding
//!
//! Turns an inbound HTTP method and body into the ordered list of keys to
//! resolve. The method is checked before the body is touched.

use crate::error::{Error, Result};
use axum::body::Body;
use http::Method;
use scheduling_provider_protocol::ProviderRequest;
use tracing::info;

/// Ordered keys of one batch lookup, duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    keys: Vec<String>,
}

impl BatchRequest {
    /// Create a batch from keys in request order.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Keys in request order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys, duplicates included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when there is nothing to resolve.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<ProviderRequest> for BatchRequest {
    fn from(request: ProviderRequest) -> Self {
        Self::new(request.into_keys())
    }
}

/// Reject anything but POST.
pub fn check_method(method: &Method) -> Result<()> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(Error::MethodNotAllowed)
    }
}

/// Parse a fully read body into a batch.
///
/// # Errors
///
/// Returns [`Error::MalformedPayload`] if the body is not a provider request.
pub fn parse_payload(body: &[u8]) -> Result<BatchRequest> {
    info!(body = %String::from_utf8_lossy(body), "received request");

    let request =
        ProviderRequest::from_slice(body).map_err(|e| Error::MalformedPayload(e.to_string()))?;
    let batch = BatchRequest::from(request);

    info!(keys = ?batch.keys(), "keys");
    Ok(batch)
}

/// Decode an inbound request.
///
/// At most `max_body_bytes` are read; a larger body counts as unreadable.
///
/// # Errors
///
/// - [`Error::MethodNotAllowed`] unless the method is POST
/// - [`Error::MalformedBody`] if the body cannot be read fully
/// - [`Error::MalformedPayload`] if the body is not a provider request
pub async fn decode(method: &Method, body: Body, max_body_bytes: usize) -> Result<BatchRequest> {
    check_method(method)?;

    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|e| Error::MalformedBody(e.to_string()))?;

    parse_payload(&bytes)
}
