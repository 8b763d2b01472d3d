//! Mock provider for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mockview_core::traits::{GenerateRequest, GenerateResponse, LlmProvider, ModelInfo, TokenUsage};

use crate::error::ProviderError;

/// A mock LLM provider that answers without network access.
///
/// Responses are chosen by prompt substring; when several keys match, the
/// longest one wins so the choice does not depend on map order.
pub struct MockProvider {
    /// Map of prompt substring to response text.
    responses: HashMap<String, String>,
    /// Response when no key matches.
    default_response: String,
    /// When set, every call fails with an API error of this status.
    failure_status: Option<u16>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with the given prompt-to-response mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: String::new(),
            failure_status: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock whose every call fails with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            failure_status: Some(status),
            ..Self::new(HashMap::new())
        }
    }

    /// Replace the response used when no key matches.
    pub fn default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    fn respond_to(&self, prompt: &str) -> String {
        self.responses
            .iter()
            .filter(|(key, _)| prompt.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(status) = self.failure_status {
            return Err(ProviderError::ApiError {
                status,
                message: "mock failure".into(),
            }
            .into());
        }

        let content = self.respond_to(&request.prompt);
        // Rough estimate: four characters per token.
        let prompt_tokens = (request.prompt.len() / 4) as u32;
        let completion_tokens = (content.len() / 4) as u32;

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "mock".into(),
            prompt: prompt.into(),
            system_prompt: None,
            max_tokens: 100,
            temperature: 0.0,
            web_search: false,
        }
    }

    #[tokio::test]
    async fn fixed_response() {
        let provider = MockProvider::with_fixed_response("Great answer");
        let response = provider.generate(&request("anything")).await.unwrap();
        assert_eq!(response.content, "Great answer");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_request().unwrap().prompt, "anything");
    }

    #[tokio::test]
    async fn longest_matching_key_wins() {
        let mut responses = HashMap::new();
        responses.insert("interview".to_string(), "generic".to_string());
        responses.insert("failed interview".to_string(), "study plan".to_string());
        let provider = MockProvider::new(responses).default_response("fallback");

        let resp = provider
            .generate(&request("analyzing a failed interview performance"))
            .await
            .unwrap();
        assert_eq!(resp.content, "study plan");

        let resp = provider.generate(&request("an interview")).await.unwrap();
        assert_eq!(resp.content, "generic");

        let resp = provider.generate(&request("unrelated")).await.unwrap();
        assert_eq!(resp.content, "fallback");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_mock_returns_provider_error() {
        let provider = MockProvider::failing(503);
        let err = provider.generate(&request("x")).await.unwrap_err();
        let provider_err = err.downcast_ref::<ProviderError>().unwrap();
        assert!(matches!(
            provider_err,
            ProviderError::ApiError { status: 503, .. }
        ));
        assert_eq!(provider.call_count(), 1);
    }
}
