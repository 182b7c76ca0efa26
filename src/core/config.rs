use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use super::error::{Result, ScamScoreError};
use crate::analysis::JsonExtraction;
use crate::{
    DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MODEL, DEFAULT_MAX_TOKENS,
    DEFAULT_NEGATIVE_RESULT_LIMIT, DEFAULT_PORT, DEFAULT_POSITIVE_RESULT_LIMIT,
    DEFAULT_SEARCH_BASE_URL, DEFAULT_SNIPPET_CHARS, DEFAULT_TEMPERATURE,
};

pub const ENV_PREFIX: &str = "SCAMSCORE";
pub const SEARCH_API_KEY_VAR: &str = "EXA_API_KEY";
pub const COMPLETION_API_KEY_VAR: &str = "OPENROUTER_API_KEY";


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScamScoreConfig {
    pub host: String,
    pub port: u16,

    pub search_api_key: String,
    pub search_base_url: String,

    pub completion_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub temperature: f64,
    pub max_tokens: u32,

    pub negative_result_limit: usize,
    pub positive_result_limit: usize,
    pub snippet_chars: usize,
    pub json_extraction: JsonExtraction,

    /// Unset means outbound calls wait for the transport to give up.
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl ScamScoreConfig {

    pub fn new(search_api_key: impl Into<String>, completion_api_key: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,

            search_api_key: search_api_key.into(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),

            completion_api_key: completion_api_key.into(),
            completion_base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,

            negative_result_limit: DEFAULT_NEGATIVE_RESULT_LIMIT,
            positive_result_limit: DEFAULT_POSITIVE_RESULT_LIMIT,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            json_extraction: JsonExtraction::Greedy,

            http_timeout_secs: None,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Defaults, then `SCAMSCORE_*` variables, then the two credential variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::new("", "");

        let settings = Config::builder()
            .set_default("host", defaults.host.as_str())?
            .set_default("port", i64::from(defaults.port))?
            .set_default("search_api_key", "")?
            .set_default("search_base_url", defaults.search_base_url.as_str())?
            .set_default("completion_api_key", "")?
            .set_default("completion_base_url", defaults.completion_base_url.as_str())?
            .set_default("completion_model", defaults.completion_model.as_str())?
            .set_default("temperature", defaults.temperature)?
            .set_default("max_tokens", i64::from(defaults.max_tokens))?
            .set_default("negative_result_limit", defaults.negative_result_limit as i64)?
            .set_default("positive_result_limit", defaults.positive_result_limit as i64)?
            .set_default("snippet_chars", defaults.snippet_chars as i64)?
            .set_default("json_extraction", "greedy")?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("search_api_key", std::env::var(SEARCH_API_KEY_VAR).ok())?
            .set_override_option(
                "completion_api_key",
                std::env::var(COMPLETION_API_KEY_VAR).ok(),
            )?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        if self.search_api_key.trim().is_empty() {
            return Err(ScamScoreError::Config(format!(
                "search API key missing (set {SEARCH_API_KEY_VAR})"
            )));
        }
        if self.completion_api_key.trim().is_empty() {
            return Err(ScamScoreError::Config(format!(
                "completion API key missing (set {COMPLETION_API_KEY_VAR})"
            )));
        }

        for (field, value) in [
            ("search_base_url", &self.search_base_url),
            ("completion_base_url", &self.completion_base_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                ScamScoreError::Config(format!("{field} is not a valid URL ({value}): {e}"))
            })?;
        }

        if self.completion_model.trim().is_empty() {
            return Err(ScamScoreError::Config("completion_model must not be empty".into()));
        }
        if self.negative_result_limit == 0 || self.positive_result_limit == 0 {
            return Err(ScamScoreError::Config("result limits must be at least 1".into()));
        }
        if self.snippet_chars == 0 {
            return Err(ScamScoreError::Config("snippet_chars must be at least 1".into()));
        }
        if self.max_tokens == 0 {
            return Err(ScamScoreError::Config("max_tokens must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ScamScoreError::Config(format!(
                "temperature {} outside [0, 2]",
                self.temperature
            )));
        }

        Ok(())
    }
}
