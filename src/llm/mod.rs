//! Model backend abstraction
//!
//! The pipeline only ever needs "prompt in, text out". [`LLMClient`] is that
//! seam; [`OllamaClient`] is the production backend and [`MockLLMClient`]
//! replays canned answers in tests. [`PromptClient`] layers the prompt
//! templates and the forgiving JSON recovery of [`parse_structured`] on top.

mod client;
mod error;
pub mod extract;
mod mock;
mod ollama;
pub mod prompt;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use extract::{parse_structured, parse_structured_or_empty, StructuredObject};
pub use mock::{MockLLMClient, MockResponse};
pub use ollama::OllamaClient;
pub use prompt::PromptClient;
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
