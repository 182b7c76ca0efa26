

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;


#[derive(Error, Debug)]
pub enum SearchProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchMode {
    Neural,
    Keyword,
}


#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
    pub mode: SearchMode,
    pub use_autoprompt: bool,
    pub include_text: bool,
}

impl SearchQuery {
    /// Neural mode with auto-prompt expansion and full page text.
    pub fn neural(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            limit,
            mode: SearchMode::Neural,
            use_autoprompt: true,
            include_text: true,
        }
    }
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, text: Option<&str>) -> Self {
        Self {
            title: Some(title.into()),
            text: text.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Empty image strings count as no image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }
}


#[async_trait]
pub trait SearchProvider: Send + Sync {

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchProviderError>;


    fn provider_name(&self) -> &str;
}


#[async_trait]
impl SearchProvider for Arc<dyn SearchProvider> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchProviderError> {
        (**self).search(query).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neural_query_defaults() {
        let query = SearchQuery::neural("Jane Doe scam", 10);
        assert_eq!(query.mode, SearchMode::Neural);
        assert!(query.use_autoprompt);
        assert!(query.include_text);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_image_url_ignores_empty() {
        let result = SearchResult::new("t", None).with_image("");
        assert_eq!(result.image_url(), None);

        let result = SearchResult::new("t", None).with_image("https://img.example/a.png");
        assert_eq!(result.image_url(), Some("https://img.example/a.png"));
    }

    #[test]
    fn test_result_tolerates_nulls_and_missing_fields() {
        let result: SearchResult = serde_json::from_value(serde_json::json!({
            "title": null,
            "url": "https://example.com",
            "publishedDate": "2024-01-01",
            "score": 0.42
        }))
        .unwrap();
        assert_eq!(result.title, None);
        assert_eq!(result.text, None);
        assert_eq!(result.published_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_search_mode_strings() {
        let mode: &'static str = SearchMode::Neural.into();
        assert_eq!(mode, "neural");
        assert_eq!("keyword".parse::<SearchMode>().unwrap(), SearchMode::Keyword);
    }
}
