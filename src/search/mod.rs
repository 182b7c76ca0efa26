

pub mod base;
pub mod exa;

pub use base::{SearchMode, SearchProvider, SearchProviderError, SearchQuery, SearchResult};
pub use exa::ExaProvider;
