//! OpenAI-compatible endpoints through rig-core.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::openai};
use serde_json::json;

use crate::error::AiError;
use crate::provider::{AiConfig, CompletionProviderTrait, CompletionRequest};

/// Talks to api.openai.com, or to `endpoint` when one is configured.
pub struct OpenAiCompatibleProvider {
    config: AiConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Uses the Completions API rather than the Responses API so that
    /// self-hosted gateways work too.
    fn client(&self) -> Result<openai::CompletionsClient<HttpClient>, AiError> {
        let key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| AiError::MissingApiKey("openai".to_string()))?;
        let mut builder = openai::CompletionsClient::builder().api_key(&key);
        if let Some(url) = self.config.endpoint.as_ref().filter(|u| !u.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        builder
            .build()
            .map_err(|e| AiError::Provider(e.to_string()))
    }
}

#[async_trait]
impl CompletionProviderTrait for OpenAiCompatibleProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let client = self.client()?;
        debug!(
            "Requesting completion from model {} (json_mode={})",
            self.config.model, request.json_mode
        );

        let mut builder = client
            .agent(&self.config.model)
            .preamble(&request.system_prompt)
            .temperature(request.temperature)
            .max_tokens(u64::from(request.max_tokens));
        if request.json_mode {
            builder = builder.additional_params(json!({
                "response_format": { "type": "json_object" }
            }));
        }

        builder
            .build()
            .prompt(&request.user_message)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_reported() {
        let provider = OpenAiCompatibleProvider::new(AiConfig::default());
        let err = provider
            .complete(CompletionRequest {
                system_prompt: String::new(),
                user_message: "hi".to_string(),
                max_tokens: 1,
                temperature: 0.0,
                json_mode: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MISSING_API_KEY");
    }
}
