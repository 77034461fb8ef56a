//! Gateway error types

use std::time::Duration;
use thiserror::Error;

/// Gateway error types
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A request interceptor refused to build the request
    #[error("Request rejected before sending: {0}")]
    Interceptor(String),

    /// The call exceeded the configured timeout
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Network or protocol error
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server returned a non-success HTTP status
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// Textual body that is not valid JSON
    #[error("Malformed response body: {0}")]
    MalformedResponse(String),

    /// Envelope carried a non-success code
    #[error("Backend rejected the call with code {code}: {message}")]
    Rejected { code: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Reading or writing the stored session failed
    #[error(transparent)]
    Session(#[from] sentiscope_core::CoreError),

    /// The call needs a session id and none is stored
    #[error("No session id stored; log in first")]
    NotLoggedIn,
}

impl GatewayError {
    /// Classify an error raised by reqwest while sending or reading
    pub fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(error)
        }
    }

    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Network, timeout or HTTP status failure
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Transport(_) | Self::Status { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(GatewayError::Timeout(Duration::from_millis(5000)).is_transport_failure());
        assert!(
            GatewayError::from_status(reqwest::StatusCode::BAD_GATEWAY, "down".into())
                .is_transport_failure()
        );
        assert!(!GatewayError::MalformedResponse("x".into()).is_transport_failure());
        assert!(!GatewayError::Interceptor("bad header".into()).is_transport_failure());
        assert!(!GatewayError::NotLoggedIn.is_transport_failure());
    }

    #[test]
    fn test_session_failure_keeps_core_message() {
        let err: GatewayError = sentiscope_core::CoreError::io_error("disk full").into();
        assert!(matches!(err, GatewayError::Session(_)));
        assert_eq!(err.to_string(), "IO operation failed: disk full");
    }

    #[test]
    fn test_timeout_message() {
        let err = GatewayError::Timeout(Duration::from_millis(5000));
        assert_eq!(err.to_string(), "Request timed out after 5000ms");
    }
}
