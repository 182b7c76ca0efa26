use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::{ChatMessage, CompletionRequest, LlmMetadata, LlmProvider, LlmProviderError};
use crate::DEFAULT_COMPLETION_BASE_URL;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}


/// OpenAI-compatible chat completions client; defaults to OpenRouter.
pub struct OpenRouterProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenRouterProvider {

    pub fn new(api_key: impl Into<String>, model: impl Into<String>, client: Client) -> Self {
        let model = model.into();
        info!("OpenRouter provider initialized (model={})", model);
        Self {
            api_key: api_key.into(),
            model,
            base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Chat completion request: model={}, messages={}, max_tokens={}",
            self.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let response: ChatCompletionResponse = serde_json::from_str(&raw)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmProviderError::EmptyResponse)?;

        let mut metadata = LlmMetadata {
            provider: "openrouter".to_string(),
            model: self.model.clone(),
            base_url: Some(self.base_url.clone()),
            ..Default::default()
        };

        if let Some(usage) = response.usage {
            metadata.tokens_prompt = Some(usage.prompt_tokens);
            metadata.tokens_completion = Some(usage.completion_tokens);
            metadata.tokens_total = Some(usage.total_tokens);
        }

        Ok((content, metadata))
    }

    fn provider_name(&self) -> &str {
        "openrouter"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            max_tokens: 1000,
            temperature: 0.3,
        }
    }

    #[tokio::test]
    async fn test_complete_sends_request_and_returns_first_choice() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer or-test-key")
            .match_body(Matcher::Json(json!({
                "model": "openai/gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "hello" }
                ],
                "max_tokens": 1000,
                "temperature": 0.3
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "gen-1",
                    "choices": [
                        { "index": 0, "message": { "role": "assistant", "content": "{\"scammerScore\": 12}" } },
                        { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
                    ],
                    "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = OpenRouterProvider::new("or-test-key", "openai/gpt-4o-mini", Client::new())
            .with_base_url(server.url());
        let (content, metadata) = provider.complete(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(content, "{\"scammerScore\": 12}");
        assert_eq!(metadata.provider, "openrouter");
        assert_eq!(metadata.base_url.as_deref(), Some(server.url().as_str()));
        assert_eq!(metadata.tokens_prompt, Some(120));
        assert_eq!(metadata.tokens_completion, Some(30));
        assert_eq!(metadata.tokens_total, Some(150));
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let provider = OpenRouterProvider::new("k", "m", Client::new()).with_base_url(server.url());
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmProviderError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(json!({ "choices": [] }).to_string())
            .create_async()
            .await;

        let provider = OpenRouterProvider::new("k", "m", Client::new()).with_base_url(server.url());
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmProviderError::EmptyResponse));
    }
}
