

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::core::config::ScamScoreConfig;
use crate::core::error::Result;
use crate::llm::providers::{LlmProvider, OpenRouterProvider};
use crate::search::{ExaProvider, SearchProvider};


pub struct ProviderFactory;

impl ProviderFactory {
    /// One client shared by both providers.
    pub fn http_client(config: &ScamScoreConfig) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(secs) = config.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }


    pub fn search_provider(config: &ScamScoreConfig, client: Client) -> Arc<dyn SearchProvider> {
        Arc::new(
            ExaProvider::new(config.search_api_key.clone(), client)
                .with_base_url(config.search_base_url.clone()),
        )
    }


    pub fn completion_provider(config: &ScamScoreConfig, client: Client) -> Arc<dyn LlmProvider> {
        Arc::new(
            OpenRouterProvider::new(
                config.completion_api_key.clone(),
                config.completion_model.clone(),
                client,
            )
            .with_base_url(config.completion_base_url.clone()),
        )
    }
}
