//! Transport trait and request/response types
//!
//! Defines the generic Transport trait that the scheduling lookup sends its
//! request through.

use crate::error::Result;
use async_trait::async_trait;
use http::Method;
use std::collections::HashMap;

/// Outbound HTTP request
///
/// Represents an HTTP request to be sent via the Transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,

    /// Request URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP response
///
/// Represents an HTTP response received from the server, body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Generic transport trait for different transport mechanisms
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request once and read the whole response.
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;
}
