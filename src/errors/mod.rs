//! Error types for the geocoding client.
//!
//! The remote service reports failures through a closed set of status
//! strings; anything outside that set is carried verbatim rather than
//! collapsed into a default category.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for geocoding operations.
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Remote status taxonomy of the geocoding API.
///
/// The five named categories are the complete documented set; any other
/// status string is preserved in [`ApiStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    /// The lookup succeeded at the protocol level but matched no location.
    ZeroResults,
    /// The caller's request quota with the remote service is exhausted.
    OverQueryLimit,
    /// The remote service refused the request.
    RequestDenied,
    /// The request was malformed (missing required query parameter).
    InvalidRequest,
    /// The remote service failed for an unclassified, server-side reason.
    UnknownError,
    /// An unrecognized status string, carried verbatim.
    Other(String),
}

impl ApiStatus {
    /// Classifies a remote status string.
    pub fn parse(status: &str) -> Self {
        match status {
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            "OVER_QUERY_LIMIT" => ApiStatus::OverQueryLimit,
            "REQUEST_DENIED" => ApiStatus::RequestDenied,
            "INVALID_REQUEST" => ApiStatus::InvalidRequest,
            "UNKNOWN_ERROR" => ApiStatus::UnknownError,
            other => ApiStatus::Other(other.to_string()),
        }
    }

    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ApiStatus::RequestDenied => "REQUEST_DENIED",
            ApiStatus::InvalidRequest => "INVALID_REQUEST",
            ApiStatus::UnknownError => "UNKNOWN_ERROR",
            ApiStatus::Other(status) => status,
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for geocoding client operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Configuration error (missing API key, invalid base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Request validation failed before any remote call was made.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
    },

    /// The remote service reported an error status.
    #[error("Geocoding failed: {status}")]
    Api {
        /// The classified remote status.
        status: ApiStatus,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// The remote call exceeded its deadline.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl GeocodeError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        GeocodeError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        GeocodeError::Validation {
            message: message.into(),
        }
    }

    /// Creates an API error from a remote status string.
    pub fn api(status: &str) -> Self {
        GeocodeError::Api {
            status: ApiStatus::parse(status),
        }
    }

    /// Returns the remote status if this is an API error.
    pub fn status(&self) -> Option<&ApiStatus> {
        match self {
            GeocodeError::Api { status } => Some(status),
            _ => None,
        }
    }

    /// Stable label used when tallying batch failures.
    pub fn category(&self) -> &str {
        match self {
            GeocodeError::Api { status } => status.as_str(),
            GeocodeError::Network { .. } => "NETWORK_ERROR",
            GeocodeError::Timeout { .. } => "TIMEOUT",
            GeocodeError::Serialization { .. } => "PARSE_ERROR",
            GeocodeError::Validation { .. } => "INVALID_ADDRESS",
            GeocodeError::Configuration { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<TransportError> for GeocodeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { timeout } => GeocodeError::Timeout {
                message: format!("no response after {timeout:?}"),
            },
            other => GeocodeError::Network {
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout {
                message: err.to_string(),
            }
        } else {
            GeocodeError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(err: serde_json::Error) -> Self {
        GeocodeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for GeocodeError {
    fn from(err: url::ParseError) -> Self {
        GeocodeError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
