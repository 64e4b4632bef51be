//! Configuration for the scheduling provider
//!
//! The configuration is built once at start-up and shared read-only with every
//! request. Business logic never reads the environment itself.

use scheduling_provider_transport::HttpTransportConfig;
use std::time::Duration;

/// Default address the provider listens on
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8090";

/// Default bound on the whole scheduling service call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on establishing the scheduling service connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default cap on the inbound request body
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Location of the scheduling service.
///
/// The four parts are opaque strings joined as `{base_url}{k8s_suffix}:{port}{endpoint}`.
/// Nothing is validated here: an empty part is carried into the URL as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Scheme and service name, e.g. `http://scheduler`
    pub base_url: String,

    /// Cluster DNS suffix, e.g. `.default.svc.cluster.local`
    pub k8s_suffix: String,

    /// Service port
    pub port: String,

    /// Path of the scheduling endpoint, e.g. `/schedule`
    pub endpoint: String,
}

impl UpstreamConfig {
    /// Create an upstream location from its four parts.
    pub fn new(
        base_url: impl Into<String>,
        k8s_suffix: impl Into<String>,
        port: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            k8s_suffix: k8s_suffix.into(),
            port: port.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Full URL of the scheduling endpoint.
    pub fn target_url(&self) -> String {
        format!(
            "{}{}:{}{}",
            self.base_url, self.k8s_suffix, self.port, self.endpoint
        )
    }

    /// Names of the parts that are empty.
    pub fn empty_parts(&self) -> Vec<&'static str> {
        [
            ("base_url", &self.base_url),
            ("k8s_suffix", &self.k8s_suffix),
            ("port", &self.port),
            ("endpoint", &self.endpoint),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Configuration for the provider process.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Scheduling service location
    pub upstream: UpstreamConfig,

    /// Address to bind the HTTP listener to
    pub listen_addr: String,

    /// Bound on the whole scheduling service call
    pub upstream_timeout: Duration,

    /// Bound on establishing the scheduling service connection
    pub connect_timeout: Duration,

    /// Largest inbound body accepted, in bytes
    pub max_body_bytes: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ProviderConfig {
    /// Create a builder.
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `SCHEDULER_BASE_URL`, `SCHEDULER_K8S_SUFFIX`, `SCHEDULER_PORT`,
    ///   `SCHEDULER_ENDPOINT` for the scheduling service location (unset means empty)
    /// - `PROVIDER_LISTEN_ADDR` for the listen address
    /// - `PROVIDER_UPSTREAM_TIMEOUT_SECS` for the scheduling call timeout
    /// - `PROVIDER_CONNECT_TIMEOUT_SECS` for the connect timeout
    /// - `PROVIDER_MAX_BODY_BYTES` for the inbound body cap
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if a numeric setting does not parse or is zero.
    #[cfg(feature = "env")]
    pub fn from_env() -> crate::Result<Self> {
        use std::env;

        let mut config = Self {
            upstream: UpstreamConfig::new(
                env::var("SCHEDULER_BASE_URL").unwrap_or_default(),
                env::var("SCHEDULER_K8S_SUFFIX").unwrap_or_default(),
                env::var("SCHEDULER_PORT").unwrap_or_default(),
                env::var("SCHEDULER_ENDPOINT").unwrap_or_default(),
            ),
            ..Self::default()
        };

        if let Ok(listen_addr) = env::var("PROVIDER_LISTEN_ADDR") {
            config.listen_addr = listen_addr;
        }

        if let Some(secs) = parse_env::<u64>("PROVIDER_UPSTREAM_TIMEOUT_SECS")? {
            config.upstream_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_env::<u64>("PROVIDER_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Some(bytes) = parse_env::<usize>("PROVIDER_MAX_BODY_BYTES")? {
            config.max_body_bytes = bytes;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the limits are usable.
    ///
    /// A zero timeout fails every lookup and a zero body cap rejects every request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] naming the first zero setting.
    pub fn validate(&self) -> crate::Result<()> {
        let zero = [
            ("upstream_timeout", self.upstream_timeout.is_zero()),
            ("connect_timeout", self.connect_timeout.is_zero()),
            ("max_body_bytes", self.max_body_bytes == 0),
        ]
        .into_iter()
        .find(|(_, is_zero)| *is_zero);

        match zero {
            Some((name, _)) => Err(crate::Error::Config(format!("{name} must be greater than zero"))),
            None => Ok(()),
        }
    }

    /// Transport settings for the scheduling service client.
    pub fn transport_config(&self) -> HttpTransportConfig {
        HttpTransportConfig {
            timeout: self.upstream_timeout,
            connect_timeout: self.connect_timeout,
            ..HttpTransportConfig::default()
        }
    }
}

#[cfg(feature = "env")]
fn parse_env<T>(name: &str) -> crate::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| crate::Error::Config(format!("{name}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Builder for creating ProviderConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
}

impl ProviderConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scheduling service location.
    pub fn upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.config.upstream = upstream;
        self
    }

    /// Set the listen address.
    pub fn listen_addr(mut self, listen_addr: impl Into<String>) -> Self {
        self.config.listen_addr = listen_addr.into();
        self
    }

    /// Set the scheduling call timeout.
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.config.upstream_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the inbound body cap.
    pub fn max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.config.max_body_bytes = max_body_bytes;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ProviderConfig {
        self.config
    }
}
