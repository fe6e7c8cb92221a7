//! Error types for report generation

use analyst_llm::LlmError;
use analyst_pipeline::PipelineError;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while generating a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// No API credential could be resolved; no report can be produced
    ///
    /// Checked before any network call. The message doubles as the
    /// remediation text shown to the user.
    #[error(
        "DeepSeek API key not found. Provide a secrets file or set the \
         DEEPSEEK_API_KEY environment variable."
    )]
    CredentialMissing,

    /// The pipeline run failed; the user may resubmit
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A direct chat call failed (simplified variant)
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_message_names_remediation() {
        let text = ReportError::CredentialMissing.to_string();
        assert!(text.contains("DEEPSEEK_API_KEY"));
        assert!(text.contains("secrets file"));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: ReportError = PipelineError::EmptyPipeline.into();
        assert_eq!(err.to_string(), "pipeline has no tasks to execute");
    }
}
