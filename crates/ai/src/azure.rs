//! Azure-hosted chat completions over plain REST.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AiError;
use crate::provider::{AiConfig, CompletionProviderTrait, CompletionRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AzureOpenAiProvider {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessageBody<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessageBody<'a>>,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AzureOpenAiProvider {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    fn completions_url(&self) -> Result<String, AiError> {
        let endpoint = self
            .config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AiError::internal("Azure endpoint is not configured"))?;
        Ok(deployment_url(
            endpoint,
            &self.config.model,
            &self.config.api_version,
        ))
    }
}

fn deployment_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim().trim_end_matches('/'),
        deployment,
        api_version
    )
}

fn request_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatCompletionBody<'a> {
    ChatCompletionBody {
        model,
        messages: vec![
            ChatMessageBody {
                role: "system",
                content: &request.system_prompt,
            },
            ChatMessageBody {
                role: "user",
                content: &request.user_message,
            },
        ],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        response_format: request.json_mode.then_some(ResponseFormat {
            kind: "json_object",
        }),
    }
}

#[async_trait]
impl CompletionProviderTrait for AzureOpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey("azure".to_string()))?;
        let url = self.completions_url()?;
        debug!(
            "Requesting completion from deployment {} (json_mode={})",
            self.config.model, request.json_mode
        );

        let response = self
            .http
            .post(&url)
            .header("api-key", api_key)
            .json(&request_body(&self.config.model, &request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::provider(format!(
                "completion endpoint returned {}: {}",
                status, body
            )));
        }

        let reply: ChatCompletionReply = response.json().await?;
        Ok(reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
