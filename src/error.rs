//! Error types for media-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (validation, retrieval, storage, delivery)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for media-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for media-dl
///
/// Only a handful of failures ever reach the caller: malformed input, a batch
/// that produced nothing, storage faults, and delivery of a consumed reference.
/// Per-URL and per-lyric failures are absorbed inside the batch loop and never
/// appear here.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or empty request input, rejected before any resource is allocated
    #[error("validation error: {0}")]
    Validation(String),

    /// Every URL in the batch failed to produce a file
    #[error("retrieval failed: {0}")]
    RetrievalFailed(String),

    /// Directory or file creation, listing, or archive building failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Download reference does not exist or has already been consumed
    #[error("not found: {0}")]
    NotFound(String),

    /// External tool could not be located or executed (e.g. the yt-dlp binary)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error from the lyric provider
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
/// It follows a standard format with machine-readable error codes and
/// human-readable messages.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "validation error: at least one URL required"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "validation_error")
    ///
    /// Clients can use this for programmatic error handling.
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// Create a "not found" error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("not_found", format!("{} not found", resource.into()))
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Validation(_) => 400,

            // 404 Not Found - Consumed or nonexistent reference
            Error::NotFound(_) => 404,

            // 500 Internal Server Error - Server-side issues
            Error::Storage(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - Upstream/extraction faults
            Error::RetrievalFailed(_) => 502,
            Error::Network(_) => 502,

            // 503 Service Unavailable - Missing external binary
            Error::ExternalTool(_) => 503,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::RetrievalFailed(_) => "retrieval_failed",
            Error::Storage(_) => "storage_error",
            Error::NotFound(_) => "not_found",
            Error::ExternalTool(_) => "external_tool_error",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError {
            error: ErrorDetail {
                code: error.error_code().to_string(),
                message: error.to_string(),
            },
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a vec of (Error, expected_status_code, expected_error_code) for
    /// every reachable match arm in ToHttpStatus.
    fn all_error_variants() -> Vec<(Error, u16, &'static str)> {
        vec![
            (
                Error::Validation("at least one URL required".into()),
                400,
                "validation_error",
            ),
            (
                Error::RetrievalFailed("every URL in the batch failed".into()),
                502,
                "retrieval_failed",
            ),
            (
                Error::Storage("could not create workspace".into()),
                500,
                "storage_error",
            ),
            (Error::NotFound("file xyz.mp3".into()), 404, "not_found"),
            (
                Error::ExternalTool("yt-dlp not found in PATH".into()),
                503,
                "external_tool_error",
            ),
            (
                Error::Io(std::io::Error::other("disk full")),
                500,
                "io_error",
            ),
            (
                Error::ApiServerError("bind failed".into()),
                500,
                "api_server_error",
            ),
        ]
    }

    #[test]
    fn status_and_error_codes_match_expected_mapping() {
        for (error, status, code) in all_error_variants() {
            assert_eq!(error.status_code(), status, "status for {:?}", error);
            assert_eq!(error.error_code(), code, "code for {:?}", error);
        }
    }

    #[test]
    fn error_to_api_error_carries_message() {
        let error = Error::RetrievalFailed(
            "every URL failed; upstream may be blocking this host or the cookie file is stale"
                .into(),
        );
        let api_error: ApiError = error.into();

        assert_eq!(api_error.error.code, "retrieval_failed");
        assert!(api_error.error.message.contains("upstream"));
    }

    #[test]
    fn api_error_constructors() {
        let not_found = ApiError::not_found("task abc123");
        assert_eq!(not_found.error.code, "not_found");
        assert!(not_found.error.message.contains("abc123"));

        let validation = ApiError::validation("bad format selector");
        assert_eq!(validation.error.code, "validation_error");

        let internal = ApiError::internal("unexpected");
        assert_eq!(internal.error.code, "internal_error");
    }

    #[test]
    fn api_error_serializes_to_nested_envelope() {
        let api_error = ApiError::validation("at least one URL required");
        let json = serde_json::to_value(&api_error).unwrap();

        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], "at least one URL required");
    }

    #[test]
    fn io_errors_convert_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io.into();
        assert_eq!(error.status_code(), 500);
        assert!(error.to_string().contains("denied"));
    }
}
