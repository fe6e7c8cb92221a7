//! DeepSeek chat-completion client for analyst-rs
//!
//! This crate provides the LLM transport layer used by the report pipeline:
//!
//! - Role-tagged message types for chat conversations
//! - Chat request/response types with a builder
//! - The `ChatProvider` trait so orchestration code can be tested against stubs
//! - `DeepSeekClient`, a thin HTTP client over the `/chat/completions` wire
//!   protocol with both a blocking and a streaming path

pub mod chat;
pub mod client;
pub mod error;
pub mod messages;
pub mod provider;
pub mod stream;

// Re-export main types
pub use chat::{ChatRequest, ChatRequestBuilder, Completion, TokenUsage};
pub use client::{DeepSeekClient, DeepSeekConfig};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::ChatProvider;
pub use stream::{ChatDelta, ChatStream, StreamDecoder};
