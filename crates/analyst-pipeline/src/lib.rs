//! Sequential multi-agent orchestration for analyst-rs
//!
//! This crate provides the descriptors and the runner for the report
//! pipeline:
//!
//! - `AgentSpec`: a named role with a goal and persona, optionally bound to
//!   callable tools
//! - `TaskSpec`: a unit of work assigned to an agent, with upstream tasks
//!   whose outputs become prompt context
//! - `Pipeline`: executes tasks strictly in sequence, threading each task's
//!   result into the next task's prompt
//!
//! Tasks form a DAG over their upstream edges and are executed in
//! topological order; in practice the report pipeline is a simple two-stage
//! chain (analysis, then report writing).

pub mod agent;
pub mod error;
pub mod pipeline;
pub mod task;
pub mod tool;

// Re-export main types
pub use agent::AgentSpec;
pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, PipelineConfig};
pub use task::TaskSpec;
pub use tool::{TickerTool, ToolError};
