//! Gatekeeper external data envelope
//!
//! Gatekeeper sends a `ProviderRequest` carrying the keys it wants resolved and
//! expects a `ProviderResponse` back, always with HTTP 200. A response carries
//! either the resolved items or a system error, never both.

use serde::{Deserialize, Serialize};

/// API version stamped on every response envelope
pub const API_VERSION: &str = "externaldata.gatekeeper.sh/v1beta1";

/// Kind stamped on every response envelope
pub const RESPONSE_KIND: &str = "ProviderResponse";

/// Inbound batch lookup request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    /// API version sent by the caller, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind sent by the caller, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The lookup itself
    pub request: Request,
}

/// Body of a [`ProviderRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Keys to resolve, in the order the caller wants them back
    pub keys: Vec<String>,
}

impl ProviderRequest {
    /// Create a request for the given keys.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            api_version: Some(API_VERSION.to_string()),
            kind: Some("ProviderRequest".to_string()),
            request: Request {
                keys: keys.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Decode a request from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON or do not contain
    /// `request.keys` as a list of strings.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Keys in request order.
    pub fn keys(&self) -> &[String] {
        &self.request.keys
    }

    /// Consume the request, keeping only its keys.
    pub fn into_keys(self) -> Vec<String> {
        self.request.keys
    }
}

/// One resolved key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The key exactly as the caller sent it
    pub key: String,

    /// Resolved value; an empty string is a legitimate value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Per-item error marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Item {
    /// Create an item with a resolved value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            error: None,
        }
    }
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    /// Always [`API_VERSION`]
    pub api_version: String,

    /// Always [`RESPONSE_KIND`]
    pub kind: String,

    /// Items or error
    pub response: Response,
}

/// Body of a [`ProviderResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Whether repeating the request yields the same answer
    pub idempotent: bool,

    /// Resolved items, present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,

    /// Failure message, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_error: Option<String>,
}

impl ProviderResponse {
    /// Envelope carrying a complete, ordered result list.
    pub fn success(items: Vec<Item>) -> Self {
        Self::with_body(Response {
            idempotent: true,
            items: Some(items),
            system_error: None,
        })
    }

    /// Envelope carrying a single error message and no items.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_body(Response {
            idempotent: true,
            items: None,
            system_error: Some(message.into()),
        })
    }

    fn with_body(response: Response) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: RESPONSE_KIND.to_string(),
            response,
        }
    }
}

impl<E: std::fmt::Display> From<std::result::Result<Vec<Item>, E>> for ProviderResponse {
    fn from(result: std::result::Result<Vec<Item>, E>) -> Self {
        match result {
            Ok(items) => Self::success(items),
            Err(err) => Self::error(err.to_string()),
        }
    }
}
