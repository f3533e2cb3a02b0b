//! Error types for the Tavily gateway.

use thiserror::Error;

/// Failures talking to the Tavily API.
///
/// These never become protocol faults: the dispatcher wraps every variant
/// into a tool-level error result. The 401 and 429 display strings are part
/// of that observable output and must not change.
#[derive(Debug, Error)]
pub enum TavilyError {
    /// Upstream rejected the credential (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Upstream quota exhausted (HTTP 429).
    #[error("Usage limit exceeded")]
    UsageLimitExceeded,

    /// Any other non-success status, with whatever message the body carried.
    #[error("HTTP {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Connection, TLS, or body decoding failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_and_quota_messages() {
        assert_eq!(TavilyError::InvalidApiKey.to_string(), "Invalid API key");
        assert_eq!(
            TavilyError::UsageLimitExceeded.to_string(),
            "Usage limit exceeded"
        );
    }

    #[test]
    fn test_api_error_preserves_status_and_message() {
        let error = TavilyError::Api {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: "upstream unavailable".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("502"));
        assert!(text.contains("upstream unavailable"));
    }
}
