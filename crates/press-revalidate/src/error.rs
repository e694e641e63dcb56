//! Revalidation error types.

use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Errors raised while delivering a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint did not answer within the timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint could not be reached.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request could not be built or sent.
    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Classify a reqwest error.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Why a qualifying dispatch did not succeed.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The request never got a response.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered with something other than 200.
    #[error("Non-200 from revalidate endpoint: {}", .0.as_u16())]
    UnexpectedStatus(StatusCode),
}

impl DispatchError {
    /// Status code returned by the endpoint, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let err = DispatchError::UnexpectedStatus(StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Non-200 from revalidate endpoint: 401");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_transport_error_wraps() {
        let err: DispatchError = TransportError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(err.to_string(), "Transport failure: Request timed out after 5s");
        assert_eq!(err.status(), None);
    }
}
