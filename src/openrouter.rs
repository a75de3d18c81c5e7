use crate::models::{CompletionResult, TokenUsage};
use crate::prompt::SYSTEM_INSTRUCTION;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use reqwest::Client;
use tracing::{info, error};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("Other: {0}")] Other(String),
}

/// One-shot chat-completion provider. Trait seam so the pipeline can run
/// against a stub in tests.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        api_key: &str,
    ) -> Result<CompletionResult, CompletionError>;
}

pub struct OpenRouterClient {
    client: Client,
    api_url: String,
}

const SAMPLING_TEMPERATURE: f64 = 0.7;

impl OpenRouterClient {
    pub fn new() -> Self {
        let api_url = std::env::var("OPENROUTER_API_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string());
        Self { client: Client::new(), api_url }
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl CompletionApi for OpenRouterClient {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        api_key: &str,
    ) -> Result<CompletionResult, CompletionError> {
        info!("🔗 Requesting completion from {} (model: {})", self.api_url, model);

        let request_body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": prompt }
            ],
            "temperature": SAMPLING_TEMPERATURE,
            "response_format": { "type": "json_object" }
        });

        // Single attempt only. The key goes in the Authorization header and
        // must never appear in logs.
        let response = self.client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", "https://apify.com")
            .header("X-Title", "Product Description Writer")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ OpenRouter error response: {}", error_body);
            return Err(CompletionError::Http(format!("status={} body={}", status, error_body)));
        }

        let response_text = response.text().await
            .map_err(|e| CompletionError::Other(e.to_string()))?;

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| CompletionError::Other(format!("parse error: {}: {}", e, response_text)))?;

        let content = parsed.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::Other("no choices in response".into()))?;

        info!(
            "✅ Completion received ({} chars, {} prompt + {} completion tokens)",
            content.len(), parsed.usage.prompt_tokens, parsed.usage.completion_tokens
        );

        Ok(CompletionResult { content, usage: parsed.usage })
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: TokenUsage,
}

#[derive(Debug, Deserialize)]
struct Choice { message: Message }

#[derive(Debug, Deserialize)]
struct Message { content: String }

/// In-memory provider stand-in for exercising the pipeline without a network.
#[cfg(test)]
pub mod stub {
    use super::*;

    pub struct StubApi {
        content: String,
        usage: TokenUsage,
        fail_with: Option<String>,
    }

    impl StubApi {
        pub fn returning(content: &str, usage: TokenUsage) -> Self {
            Self { content: content.to_string(), usage, fail_with: None }
        }

        pub fn failing(message: &str) -> Self {
            Self { content: String::new(), usage: TokenUsage::default(), fail_with: Some(message.to_string()) }
        }
    }

    #[async_trait]
    impl CompletionApi for StubApi {
        async fn complete(
            &self,
            _prompt: &str,
            _model: &str,
            _api_key: &str,
        ) -> Result<CompletionResult, CompletionError> {
            if let Some(msg) = &self.fail_with {
                return Err(CompletionError::Http(msg.clone()));
            }
            Ok(CompletionResult { content: self.content.clone(), usage: self.usage })
        }
    }
}
