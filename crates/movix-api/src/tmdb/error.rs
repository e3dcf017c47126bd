//! `FetchError` - failures surfaced by the fetch wrapper.

use reqwest::StatusCode;

use super::retry::{Classify, FailureKind};
use super::types::TmdbErrorResponse;

/// Error returned by TMDB requests.
///
/// The retry loop returns the error of the last attempt as-is, so callers see
/// exactly what the transport reported.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error.
        message: String,
    },
    /// The request never produced a response (connect, DNS, reset, timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body is not the expected JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request path cannot be joined onto the base URL.
    #[error("invalid request path {path}: {source}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// URL parser error.
        source: url::ParseError,
    },
}

impl FetchError {
    /// Builds a `Status` error from a non-success response body.
    ///
    /// Prefers TMDB's `status_message`; falls back to the raw body, then to
    /// the canonical reason phrase for an empty body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = if let Ok(error) = serde_json::from_str::<TmdbErrorResponse>(body) {
            error.status_message
        } else if body.trim().is_empty() {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map_or_else(|| String::from("unknown error"), String::from)
        } else {
            String::from(body.trim())
        };
        Self::Status { status, message }
    }

    /// HTTP status of the failed response, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidPath { .. } => None,
        }
    }
}

impl Classify for FetchError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Status { status, .. } => FailureKind::from_status(Some(*status)),
            // A request that could not be built fails the same way every time.
            Self::Network(err) if err.is_builder() => FailureKind::Permanent,
            Self::Network(err) => FailureKind::from_status(err.status().map(|s| s.as_u16())),
            Self::Decode(_) | Self::InvalidPath { .. } => FailureKind::Permanent,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_from_response_uses_tmdb_status_message() {
        // Arrange
        let body = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;

        // Act
        let err = FetchError::from_response(404, body);

        // Assert
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "TMDB API error (HTTP 404): The resource you requested could not be found."
        );
    }

    #[test]
    fn test_from_response_keeps_raw_body() {
        // Arrange & Act
        let err = FetchError::from_response(502, "upstream timed out\n");

        // Assert
        assert!(err.to_string().ends_with("upstream timed out"));
    }

    #[test]
    fn test_from_response_empty_body_uses_reason() {
        // Arrange & Act
        let err = FetchError::from_response(503, "");

        // Assert
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_status_classification() {
        // Arrange
        let not_found = FetchError::from_response(404, "");
        let rate_limited = FetchError::from_response(429, "");
        let server = FetchError::from_response(500, "");
        let decode = FetchError::Decode(serde_json::from_str::<u8>("x").unwrap_err());

        // Act & Assert
        assert_eq!(not_found.failure_kind(), FailureKind::Permanent);
        assert_eq!(rate_limited.failure_kind(), FailureKind::Transient);
        assert_eq!(server.failure_kind(), FailureKind::Transient);
        assert_eq!(decode.failure_kind(), FailureKind::Permanent);
        assert_eq!(decode.status(), None);
    }
}
