//! Report engine configuration
//!
//! Configuration is an explicit value passed into the engine constructor;
//! nothing reads process-wide state after startup. The API credential is
//! resolved once, checking a secrets file first and the environment second —
//! absence is a hard stop.

use crate::error::{ReportError, Result};
use std::path::Path;

/// Default location of the mounted API-key secret
pub const DEFAULT_SECRETS_FILE: &str = "/run/secrets/deepseek_api_key";

/// Configuration for one report engine
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// DeepSeek API key
    pub api_key: String,

    /// Chat endpoint base URL
    pub api_base: String,

    /// Model used for every pipeline task
    pub model: String,

    /// Sampling temperature for every task
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// History range fetched for the analysis (e.g. "1y")
    pub history_range: String,
}

impl ReportConfig {
    /// Create a configuration with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: "https://api.deepseek.com".to_string(),
            model: "deepseek-reasoner".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
            timeout_secs: 120,
            history_range: "1y".to_string(),
        }
    }

    /// Load configuration, resolving the credential from the default sources
    pub fn load() -> Result<Self> {
        let api_key = resolve_api_key(Path::new(DEFAULT_SECRETS_FILE))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the history range
    pub fn with_history_range(mut self, range: impl Into<String>) -> Self {
        self.history_range = range.into();
        self
    }
}

/// Resolve the API credential: secrets file first, then environment
///
/// A missing credential is `ReportError::CredentialMissing`, reported before
/// any network call is attempted.
pub fn resolve_api_key(secrets_file: &Path) -> Result<String> {
    if let Ok(contents) = std::fs::read_to_string(secrets_file) {
        let key = contents.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    match std::env::var("DEEPSEEK_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ReportError::CredentialMissing),
    }
}
