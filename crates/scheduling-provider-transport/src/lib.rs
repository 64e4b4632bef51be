//! Outbound transport layer for the scheduling provider
//!
//! Provides a trait-based transport abstraction so the scheduling lookup can
//! talk to the scheduling service over real HTTP in production and to a mock
//! in tests.
//!
//! # Architecture
//!
//! - **Transport trait**: Generic interface for any transport implementation
//! - **HTTP transport**: Client via reqwest with bounded timeouts
//! - **Error handling**: Connect, status and body failures kept apart
//!
//! # Usage
//!
//! ```ignore
//! use scheduling_provider_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::get("http://scheduler.default.svc.cluster.local:8080/schedule");
//! let response = transport.send_http(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
