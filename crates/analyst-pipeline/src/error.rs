//! Error types for pipeline orchestration

use analyst_llm::LlmError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running a pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A chat-completion call failed; the whole run fails with it
    ///
    /// The orchestrator does not retry or partially recover. The user may
    /// resubmit the run.
    #[error("pipeline execution failed: {0}")]
    Execution(#[from] LlmError),

    /// The pipeline was given no tasks
    #[error("pipeline has no tasks to execute")]
    EmptyPipeline,

    /// A task referenced an agent index outside the agent list
    #[error("task {task} references unknown agent {agent}")]
    UnknownAgent { task: usize, agent: usize },

    /// A task referenced an invalid upstream index
    #[error("task {task} references invalid upstream task {upstream}")]
    InvalidUpstream { task: usize, upstream: usize },

    /// Upstream edges contain a cycle
    #[error("task dependencies contain a cycle")]
    CyclicTasks,
}
