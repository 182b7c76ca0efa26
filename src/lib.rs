pub mod analysis;
pub mod core;
pub mod factory;
pub mod llm;
pub mod search;
pub mod server;
pub mod utils;

pub use utils::{log_preview, safe_truncate};


pub use crate::core::config::ScamScoreConfig;
pub use crate::core::error::{Result, ScamScoreError};
pub use analysis::{AnalysisError, AnalysisReport, Analyzer, ErrorKind};
pub use factory::ProviderFactory;


pub const DEFAULT_PORT: u16 = 3000;


pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.exa.ai";


pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://openrouter.ai/api/v1";


pub const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4o-mini";


pub const DEFAULT_TEMPERATURE: f64 = 0.3;


pub const DEFAULT_MAX_TOKENS: u32 = 1000;


pub const DEFAULT_NEGATIVE_RESULT_LIMIT: usize = 10;


pub const DEFAULT_POSITIVE_RESULT_LIMIT: usize = 5;


pub const DEFAULT_SNIPPET_CHARS: usize = 500;
