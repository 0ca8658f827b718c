//! Completion provider seam.
//!
//! The advisor only needs "system prompt + user message in, text out".
//! Concrete endpoints are chosen once from [`AiConfig`] and injected.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::azure::AzureOpenAiProvider;
use crate::error::AiError;
use crate::openai::OpenAiCompatibleProvider;

/// One non-streaming chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Ask the endpoint for a JSON object reply.
    pub json_mode: bool,
}

#[async_trait]
pub trait CompletionProviderTrait: Send + Sync {
    /// Returns the first choice's text. An empty string is a valid reply.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Azure-hosted deployment addressed by name
    Azure,
    /// Any endpoint speaking the OpenAI chat completions API
    OpenAi,
}

impl ProviderKind {
    pub fn parse(raw: &str) -> Result<Self, AiError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "azure" | "azure-openai" => Ok(ProviderKind::Azure),
            "openai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            other => Err(AiError::invalid_input(format!(
                "Unknown AI provider '{}'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "azure",
            ProviderKind::OpenAi => "openai",
        }
    }
}

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    /// Resource URL for Azure, optional base URL for OpenAI-compatible hosts
    pub endpoint: Option<String>,
    pub api_version: String,
    /// Deployment name for Azure, model id otherwise
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Azure,
            api_key: None,
            endpoint: None,
            api_version: "2024-02-15-preview".to_string(),
            model: "gpt-4".to_string(),
        }
    }
}

/// Builds the provider named by the configuration. Missing keys surface
/// when a completion is requested, not here.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn CompletionProviderTrait>, AiError> {
    let provider: Arc<dyn CompletionProviderTrait> = match config.provider {
        ProviderKind::Azure => Arc::new(AzureOpenAiProvider::new(config.clone())?),
        ProviderKind::OpenAi => Arc::new(OpenAiCompatibleProvider::new(config.clone())),
    };
    Ok(provider)
}

/// Scripted provider for tests. Replies are consumed in order; once the
/// script runs out every call fails.
#[derive(Default)]
pub struct FakeCompletionProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        let fake = Self::new();
        fake.push_reply(reply);
        fake
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let fake = Self::new();
        fake.push_failure(message);
        fake
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(reply.into()));
        }
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(message.into()));
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProviderTrait for FakeCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self
            .script
            .lock()
            .map_err(|_| AiError::internal("fake provider lock poisoned"))?
            .pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(AiError::provider(message)),
            None => Err(AiError::provider("no scripted reply left")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "system".to_string(),
            user_message: "hello".to_string(),
            max_tokens: 10,
            temperature: 0.0,
            json_mode: false,
        }
    }

    #[test]
    fn parses_provider_names() {
        assert_eq!(ProviderKind::parse("Azure").unwrap(), ProviderKind::Azure);
        assert_eq!(ProviderKind::parse(" openai ").unwrap(), ProviderKind::OpenAi);
        assert!(ProviderKind::parse("ollama").is_err());
    }

    #[tokio::test]
    async fn fake_replays_script_in_order() {
        let fake = FakeCompletionProvider::replying("first");
        fake.push_failure("boom");

        assert_eq!(fake.complete(request()).await.unwrap(), "first");
        assert!(matches!(
            fake.complete(request()).await,
            Err(AiError::Provider(msg)) if msg == "boom"
        ));
        assert!(fake.complete(request()).await.is_err());
        assert_eq!(fake.requests().len(), 3);
    }

    #[test]
    fn builds_both_providers_without_keys() {
        let azure = AiConfig {
            endpoint: Some("https://example.openai.azure.com/".to_string()),
            ..AiConfig::default()
        };
        assert!(build_provider(&azure).is_ok());

        let openai = AiConfig {
            provider: ProviderKind::OpenAi,
            ..AiConfig::default()
        };
        assert!(build_provider(&openai).is_ok());
    }
}
