//! Error types for the scheduling provider
//!
//! Every variant is terminal for the request it occurs in. At the HTTP
//! boundary only the `Display` text survives: it becomes the `systemError`
//! of the response envelope.

use thiserror::Error;

/// Result type alias for operations that can fail with a provider error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scheduling provider.
#[derive(Debug, Error)]
pub enum Error {
    /// Inbound request used a method other than POST.
    #[error("only POST is allowed")]
    MethodNotAllowed,

    /// Inbound body could not be read to the end.
    #[error("unable to read request body: {0}")]
    MalformedBody(String),

    /// Inbound body is not a batch lookup request.
    #[error("unable to unmarshal request body: {0}")]
    MalformedPayload(String),

    /// Scheduling service could not be reached in time.
    #[error("error getting scheduling response: error making request to scheduling service: {0}")]
    UpstreamUnreachable(String),

    /// Scheduling service answered with a non-2xx status.
    #[error("error getting scheduling response: unexpected status code: {status}")]
    UpstreamStatusError {
        /// HTTP status returned by the scheduling service
        status: u16,
    },

    /// Scheduling service response body could not be read to the end.
    #[error("error getting scheduling response: error reading response body: {0}")]
    UpstreamBodyUnreadable(String),

    /// Scheduling service response is not the three-field attribute document.
    #[error("error getting scheduling response: error unmarshalling response body: {0}")]
    UpstreamMalformedResponse(String),

    /// Requested key is not one the provider knows how to resolve.
    #[error("invalid key: {0}")]
    UnknownKey(String),

    /// Invalid process configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Listener or server I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the scheduling service, not the caller, caused the failure.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamUnreachable(_)
                | Error::UpstreamStatusError { .. }
                | Error::UpstreamBodyUnreadable(_)
                | Error::UpstreamMalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::MethodNotAllowed, "only POST is allowed")]
    #[case(Error::UnknownKey("bogus_key".into()), "invalid key: bogus_key")]
    #[case(
        Error::UpstreamStatusError { status: 503 },
        "error getting scheduling response: unexpected status code: 503"
    )]
    #[case(
        Error::MalformedPayload("missing field `request`".into()),
        "unable to unmarshal request body: missing field `request`"
    )]
    fn test_error_messages(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_is_upstream() {
        assert!(Error::UpstreamUnreachable("refused".into()).is_upstream());
        assert!(Error::UpstreamStatusError { status: 500 }.is_upstream());
        assert!(Error::UpstreamBodyUnreadable("reset".into()).is_upstream());
        assert!(Error::UpstreamMalformedResponse("eof".into()).is_upstream());

        assert!(!Error::MethodNotAllowed.is_upstream());
        assert!(!Error::MalformedBody("eof".into()).is_upstream());
        assert!(!Error::UnknownKey("x".into()).is_upstream());
    }
}
