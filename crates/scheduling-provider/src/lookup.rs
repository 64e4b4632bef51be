//! Scheduling lookup
//!
//! Fetches the current scheduling decision from the scheduling service. One
//! call is made per batch; there is no retry and nothing is cached between
//! batches.

use crate::config::{ProviderConfig, UpstreamConfig};
use crate::error::{Error, Result};
use crate::observability::{RequestTimer, UpstreamRequest, UpstreamResponse};
use async_trait::async_trait;
use scheduling_provider_protocol::SchedulingAttributes;
use scheduling_provider_transport::{HttpRequest, HttpTransport, Transport, TransportError};
use std::sync::Arc;
use tracing::debug;

/// Source of the current scheduling decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchedulingSource: Send + Sync {
    /// Fetch the scheduling attributes as the service knows them now.
    async fn fetch(&self) -> Result<SchedulingAttributes>;
}

/// [`SchedulingSource`] backed by an HTTP GET to the scheduling service.
#[derive(Clone)]
pub struct SchedulingLookup {
    transport: Arc<dyn Transport>,
    upstream: UpstreamConfig,
    url: String,
}

impl SchedulingLookup {
    /// Create a lookup sending through the given transport.
    pub fn new(upstream: &UpstreamConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            upstream: upstream.clone(),
            url: upstream.target_url(),
        }
    }

    /// Create a lookup with an HTTP transport built from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a limit is zero, or [`Error::HttpClient`]
    /// if the HTTP client cannot be constructed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(config.transport_config())
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self::new(&config.upstream, Arc::new(transport)))
    }

    /// URL every fetch is sent to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SchedulingSource for SchedulingLookup {
    async fn fetch(&self) -> Result<SchedulingAttributes> {
        debug!(
            base_url = %self.upstream.base_url,
            k8s_suffix = %self.upstream.k8s_suffix,
            port = %self.upstream.port,
            endpoint = %self.upstream.endpoint,
            "scheduling service location"
        );

        let metadata = UpstreamRequest::new("GET", &self.url);
        metadata.log_request();
        let timer = RequestTimer::start();

        let request = HttpRequest::get(&self.url).with_header("Accept", "application/json");
        let response = match self.transport.send_http(request).await {
            Ok(response) => response,
            Err(err) => {
                metadata.log_transport_error(timer.elapsed(), &err.to_string());
                return Err(transport_failure(err));
            }
        };

        let outcome = UpstreamResponse::new(response.status, response.body.len(), timer.elapsed());

        if !response.is_success() {
            let err = Error::UpstreamStatusError {
                status: response.status,
            };
            outcome.log_error(&metadata, &err.to_string());
            return Err(err);
        }

        let attributes = SchedulingAttributes::from_slice(&response.body).map_err(|e| {
            let err = Error::UpstreamMalformedResponse(e.to_string());
            outcome.log_error(&metadata, &err.to_string());
            err
        })?;

        outcome.log_success(&metadata);
        if attributes.is_unscheduled() {
            debug!("scheduling service has no decision yet");
        }

        Ok(attributes)
    }
}

fn transport_failure(err: TransportError) -> Error {
    match err {
        err if err.is_unreachable() => Error::UpstreamUnreachable(err.to_string()),
        TransportError::Body(msg) => Error::UpstreamBodyUnreadable(msg),
        // A request that could not be built or sent never reached the service either
        TransportError::Http(_)
        | TransportError::Client(_)
        | TransportError::Connection(_)
        | TransportError::Timeout => Error::UpstreamUnreachable(err.to_string()),
    }
}
