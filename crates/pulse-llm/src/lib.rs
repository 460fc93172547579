//! Chat-completion client layer for stockpulse
//!
//! This crate provides provider-agnostic types for talking to hosted Large
//! Language Models and an OpenAI-compatible provider implementation:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - [`providers::OpenAIProvider`] for any `/chat/completions` endpoint

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
