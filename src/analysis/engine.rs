use std::sync::Arc;

use futures::future::try_join;
use tracing::{debug, info, warn};

use super::error::AnalysisError;
use super::models::{AnalysisReport, ResultSet, RiskBand};
use super::parser::{parse_verdict, JsonExtraction};
use super::prompt::{
    build_analysis_prompt, build_content_summary, negative_query_text, positive_query_text,
    SYSTEM_PROMPT,
};
use crate::core::config::ScamScoreConfig;
use crate::factory::ProviderFactory;
use crate::llm::providers::{ChatMessage, CompletionRequest, LlmProvider};
use crate::search::{SearchProvider, SearchQuery};
use crate::utils::log_preview;
use crate::{
    DEFAULT_MAX_TOKENS, DEFAULT_NEGATIVE_RESULT_LIMIT, DEFAULT_POSITIVE_RESULT_LIMIT,
    DEFAULT_SNIPPET_CHARS, DEFAULT_TEMPERATURE,
};


#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub negative_result_limit: usize,
    pub positive_result_limit: usize,
    pub snippet_chars: usize,
    pub max_tokens: u32,
    pub temperature: f64,
    pub json_extraction: JsonExtraction,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            negative_result_limit: DEFAULT_NEGATIVE_RESULT_LIMIT,
            positive_result_limit: DEFAULT_POSITIVE_RESULT_LIMIT,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            json_extraction: JsonExtraction::Greedy,
        }
    }
}

impl From<&ScamScoreConfig> for AnalysisSettings {
    fn from(config: &ScamScoreConfig) -> Self {
        Self {
            negative_result_limit: config.negative_result_limit,
            positive_result_limit: config.positive_result_limit,
            snippet_chars: config.snippet_chars,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            json_extraction: config.json_extraction,
        }
    }
}


/// Turns a name into an [`AnalysisReport`] using one search provider and one LLM.
pub struct Analyzer {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn LlmProvider>,
    settings: AnalysisSettings,
}

impl Analyzer {

    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        info!(
            "Analyzer initialized: search={}, llm={}/{}",
            search.provider_name(),
            llm.provider_name(),
            llm.model_name()
        );

        Self {
            search,
            llm,
            settings: AnalysisSettings::default(),
        }
    }


    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }


    pub fn from_config(config: &ScamScoreConfig) -> crate::core::Result<Self> {
        let client = ProviderFactory::http_client(config)?;
        let search = ProviderFactory::search_provider(config, client.clone());
        let llm = ProviderFactory::completion_provider(config, client);
        Ok(Self::new(search, llm).with_settings(AnalysisSettings::from(config)))
    }


    pub async fn analyze(&self, name: &str) -> Result<AnalysisReport, AnalysisError> {
        if name.trim().is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        let results = self.gather_evidence(name).await?;
        if results.is_empty() {
            info!("No search evidence for '{}'", name);
            return Err(AnalysisError::NoEvidenceFound);
        }

        let image_url = results.first_image_url().map(str::to_string);
        let request = self.build_request(name, &results);

        let (reply, metadata) = self.llm.complete(&request).await.map_err(|e| {
            warn!("Completion call failed: {}", e);
            AnalysisError::from(e)
        })?;

        debug!(
            "Completion reply from {}/{} at {} (prompt={:?}, completion={:?}, total={:?} tokens): {}",
            metadata.provider,
            metadata.model,
            metadata.base_url.as_deref().unwrap_or("-"),
            metadata.tokens_prompt,
            metadata.tokens_completion,
            metadata.tokens_total,
            log_preview(&reply, 200)
        );

        let verdict = parse_verdict(&reply, self.settings.json_extraction)?;
        let scammer_score = verdict.validated_score()?;

        let report = AnalysisReport {
            name: name.to_string(),
            scammer_score,
            summary: verdict.summary,
            reasons: verdict.reasons,
            image_url,
            sources_count: results.len(),
            risk_band: RiskBand::from_score(scammer_score),
        };

        info!(
            "Analysis complete: name='{}', score={}, sources={}, reasons={}",
            report.name,
            report.scammer_score,
            report.sources_count,
            report.reasons.len()
        );

        Ok(report)
    }


    async fn gather_evidence(&self, name: &str) -> Result<ResultSet, AnalysisError> {
        let negative = SearchQuery::neural(
            negative_query_text(name),
            self.settings.negative_result_limit,
        );
        let positive = SearchQuery::neural(
            positive_query_text(name),
            self.settings.positive_result_limit,
        );

        let (negative_results, positive_results) =
            try_join(self.search.search(&negative), self.search.search(&positive))
                .await
                .map_err(|e| {
                    warn!("Search failed for '{}': {}", name, e);
                    AnalysisError::from(e)
                })?;

        debug!(
            "Search results: negative={}, positive={}",
            negative_results.len(),
            positive_results.len()
        );

        Ok(ResultSet::merge(negative_results, positive_results))
    }


    fn build_request(&self, name: &str, results: &ResultSet) -> CompletionRequest {
        let summary = build_content_summary(results, self.settings.snippet_chars);
        let prompt = build_analysis_prompt(name, &summary);

        debug!(
            "Built analysis prompt: sources={}, chars={}",
            results.len(),
            prompt.chars().count()
        );

        CompletionRequest {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }
}
