//! Shared protocol types for the scheduling provider
//!
//! This crate holds the wire formats spoken at both edges of the provider:
//! the Gatekeeper external data envelope on the inbound side and the
//! scheduling service's attribute document on the outbound side.
//!
//! # Type Organization
//!
//! - **Envelope types**: [`envelope`] - Provider requests, responses, result items
//! - **Scheduling types**: [`scheduling`] - Upstream attributes and recognized keys
//! - **Error types**: [`error`] - Payload decoding errors
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Serialization**: serde-based JSON
//! - **No circular dependencies**: this crate depends only on serde and serde_json
//!
//! # Usage
//!
//! ```
//! use scheduling_provider_protocol::{Item, ProviderRequest, ProviderResponse};
//!
//! let request = ProviderRequest::from_slice(br#"{"request":{"keys":["time_not_scheduled"]}}"#)?;
//! assert_eq!(request.keys(), ["time_not_scheduled"]);
//!
//! let response = ProviderResponse::success(vec![Item::new("time_not_scheduled", "")]);
//! assert!(response.response.system_error.is_none());
//! # Ok::<(), scheduling_provider_protocol::ProtocolError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod scheduling;

// Re-export commonly used types at crate level
pub use envelope::{
    API_VERSION, Item, ProviderRequest, ProviderResponse, Request, RESPONSE_KIND, Response,
};
pub use error::{ProtocolError, Result};
pub use scheduling::{REGION_NOT_SCHEDULED, SchedulingAttributes, TIME_NOT_SCHEDULED};
