//! Groq chat-completion API integration

mod analysis;
mod client;
mod types;

pub use analysis::ReviewAnalysis;
pub use client::{GroqClient, GroqConfig, GroqError};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role};
