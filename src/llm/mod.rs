

pub mod providers;

pub use providers::{
    ChatMessage, CompletionRequest, LlmMetadata, LlmProvider, LlmProviderError, OpenRouterProvider,
};
