

pub mod base;
pub mod openrouter;

pub use base::{ChatMessage, CompletionRequest, LlmMetadata, LlmProvider, LlmProviderError};
pub use openrouter::OpenRouterProvider;
