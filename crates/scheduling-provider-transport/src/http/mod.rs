//! HTTP transport implementation
//!
//! Provides an HTTP client that implements the Transport trait.
//! Requests are sent once; there is no retry layer.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
