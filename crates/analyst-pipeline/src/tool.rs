//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error produced by a failing tool invocation
///
/// Tool failures are recoverable by design: callers substitute a placeholder
/// for the missing data instead of aborting the run.
#[derive(Debug, Error)]
#[error("tool '{tool}' failed: {message}")]
pub struct ToolError {
    /// Name of the tool that failed
    pub tool: String,
    /// Human-readable failure description
    pub message: String,
}

impl ToolError {
    /// Create a new tool error
    pub fn new(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Trait for data-gathering tools bound to an agent
///
/// Tools are stateless and keyed by ticker symbol; each tool is invoked at
/// most once per task per ticker.
#[async_trait]
pub trait TickerTool: Send + Sync {
    /// Get the tool's name
    ///
    /// Must be unique within an agent's tool list.
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Invoke the tool for a ticker, returning structured data
    async fn invoke(&self, ticker: &str) -> std::result::Result<Value, ToolError>;
}
