use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::{SearchMode, SearchProvider, SearchProviderError, SearchQuery, SearchResult};
use crate::DEFAULT_SEARCH_BASE_URL;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: SearchMode,
    use_autoprompt: bool,
    num_results: usize,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
struct ExaContents {
    text: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    autoprompt_string: Option<String>,
}


pub struct ExaProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl ExaProvider {

    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        info!("Exa search provider initialized");
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

}

#[async_trait]
impl SearchProvider for ExaProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchProviderError> {
        let request = ExaSearchRequest {
            query: &query.text,
            search_type: query.mode,
            use_autoprompt: query.use_autoprompt,
            num_results: query.limit,
            contents: ExaContents {
                text: query.include_text,
            },
        };

        debug!("Exa search: query='{}', limit={}", query.text, query.limit);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ExaSearchResponse = serde_json::from_str(&body)?;

        if let Some(ref expanded) = parsed.autoprompt_string {
            debug!("Exa autoprompt expanded query to '{}'", expanded);
        }
        debug!("Exa returned {} results", parsed.results.len());

        Ok(parsed.results)
    }

    fn provider_name(&self) -> &str {
        "exa"
    }
}
