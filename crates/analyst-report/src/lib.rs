//! Report generation engine for analyst-rs
//!
//! Turns a ticker symbol into a markdown investment report by running a
//! two-stage agent pipeline (analysis, then report writing) against the
//! DeepSeek chat endpoint, with market facts gathered up front from Yahoo
//! Finance.
//!
//! The engine degrades gracefully: at construction time a variant is
//! selected once from the detected capabilities — the full multi-agent
//! pipeline, a simplified single-call analysis, or a static demo report.
//! A missing API credential is a hard stop, never a silent fallback.

pub mod agents;
pub mod config;
pub mod engine;
pub mod error;
pub mod facts;
pub mod tasks;
pub mod variant;

// Re-export main types
pub use config::ReportConfig;
pub use engine::ReportEngine;
pub use error::{ReportError, Result};
pub use variant::{Capabilities, PipelineVariant};
