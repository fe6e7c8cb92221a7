//! Error types for chat-completion operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to the chat-completion endpoint
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API credential available; nothing can be generated without one
    #[error(
        "DeepSeek API key not found; set the DEEPSEEK_API_KEY environment variable \
         or provide a secrets file"
    )]
    MissingCredential,

    /// The endpoint answered with a non-2xx status; the raw body is preserved
    /// verbatim so it can be surfaced to the user
    #[error("upstream request failed with HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request exceeded the configured timeout
    #[error("upstream request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response parsed but did not have the expected shape
    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_preserves_body() {
        let err = LlmError::Upstream {
            status: 500,
            body: "{\"error\":\"overloaded\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("overloaded"));
    }

    #[test]
    fn test_timeout_display() {
        let err = LlmError::Timeout { secs: 120 };
        assert_eq!(err.to_string(), "upstream request timed out after 120s");
    }
}
