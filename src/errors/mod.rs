/// Structured error types for upstream API calls
use thiserror::Error;

/// Errors produced while talking to the price API.
///
/// The retry layer treats every variant the same way; the distinction
/// matters for logs and for callers that want to report what went wrong.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-success HTTP status from the upstream API
    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Body decoded cleanly but contained no entries
    #[error("empty response body")]
    EmptyResponse,

    /// Transport-level failure (connection refused, timeout, DNS)
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status_and_reason() {
        let err = ApiError::HttpStatus {
            status: 429,
            reason: "Too Many Requests".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 429: Too Many Requests");
    }

    #[test]
    fn display_for_empty_and_network() {
        assert_eq!(ApiError::EmptyResponse.to_string(), "empty response body");
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
    }
}
