//! # Scheduling Provider
//!
//! Gatekeeper external data provider that answers scheduling questions:
//! - Accepts a batch of keys in a `ProviderRequest`
//! - Fetches the current scheduling decision once per batch
//! - Resolves every key against that single decision
//! - Replies with a `ProviderResponse` carrying all items or one error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scheduling_provider::{ProviderConfig, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::from_env()?;
//!     server::serve(&config).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use config::{ProviderConfig, ProviderConfigBuilder, UpstreamConfig};
pub use decoder::BatchRequest;
pub use error::{Error, Result};
pub use handler::BatchHandler;
pub use lookup::{SchedulingLookup, SchedulingSource};
pub use server::AppState;

// Module declarations
pub mod config;
pub mod decoder;
pub mod error;
pub mod handler;
pub mod lookup;
pub mod observability;
pub mod resolver;
pub mod server;

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
