//! Failure payloads shared by both backends
//!
//! Each backend encodes errors differently; gateways normalise them into
//! [`ApiError`] so orchestration code never looks at raw response bodies.

use thiserror::Error;

/// Categorized failure of a single call or of a whole operation.
///
/// `status_code()` is 0 when no HTTP exchange produced the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Rejected before any request was sent (unknown role name, etc.)
    #[error("{message}")]
    InvalidInput { message: String },

    /// Non-2xx response
    #[error("Server error, status code: {status}, error code: {}, message: {message}", .error_code.as_deref().unwrap_or("none"))]
    Http {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    /// Connection failure or timeout
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {message}")]
    Decode { message: String },

    /// Identity backend URL could not be resolved
    #[error("Identity endpoint unavailable: {message}")]
    Endpoint { message: String },
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn endpoint(message: impl Into<String>) -> Self {
        Self::Endpoint {
            message: message.into(),
        }
    }

    /// Create an error from an HTTP status code and a decoded backend message
    pub fn from_status(status: u16, error_code: Option<String>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            error_code,
            message: message.into(),
        }
    }

    /// HTTP status, or 0 when the failure did not come from a response
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            _ => 0,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message } => message,
            Self::Http { message, .. } => message,
            Self::Transport { message } => message,
            Self::Decode { message } => message,
            Self::Endpoint { message } => message,
        }
    }

    /// Whether the gateway may repeat the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Transport { .. } => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_has_no_status() {
        let err = ApiError::invalid_input("Invalid Role foo");
        assert_eq!(err.status_code(), 0);
        assert_eq!(err.message(), "Invalid Role foo");
        assert_eq!(err.to_string(), "Invalid Role foo");
    }

    #[test]
    fn test_http_display_includes_status_and_code() {
        let err = ApiError::from_status(504, Some("10001".to_string()), "Gateway timed out");
        assert_eq!(err.status_code(), 504);
        assert_eq!(err.message(), "Gateway timed out");
        let rendered = err.to_string();
        assert!(rendered.contains("504"));
        assert!(rendered.contains("10001"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::from_status(503, None, "down").is_retryable());
        assert!(ApiError::from_status(429, None, "slow down").is_retryable());
        assert!(!ApiError::from_status(400, None, "bad").is_retryable());
        assert!(!ApiError::invalid_input("nope").is_retryable());
        assert!(!ApiError::decode("garbage").is_retryable());
    }
}
