//! Advisor chat and rebalancing recommendations.

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use wealthdesk_core::dashboard::AdvisoryContext;

use crate::context::context_for;
use crate::error::AiError;
use crate::provider::{CompletionProviderTrait, CompletionRequest};

const CHAT_PROMPT: &str = include_str!("prompts/advisor_chat.txt");
const REBALANCING_PROMPT: &str = include_str!("prompts/rebalancing.txt");

const REBALANCING_REQUEST: &str =
    "Please provide portfolio rebalancing recommendations for this client.";

/// Reply used when the endpoint answers with no text.
pub const CHAT_APOLOGY: &str = "I apologize, but I couldn't generate a response at this time.";

const CHAT_TEMPERATURE: f64 = 0.7;
const CHAT_MAX_TOKENS: u32 = 500;
const REBALANCING_TEMPERATURE: f64 = 0.3;
const REBALANCING_MAX_TOKENS: u32 = 800;

/// One suggested change for an asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingRecommendation {
    pub action: String,
    pub asset_class: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub current_allocation: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub recommended_allocation: String,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingPlan {
    pub recommendations: Vec<RebalancingRecommendation>,
    #[serde(default)]
    pub risk_assessment: String,
    #[serde(default)]
    pub expected_impact: String,
    #[serde(default)]
    pub timeframe: String,
}

impl RebalancingPlan {
    /// Returned when the model reply cannot be read as a plan.
    pub fn fallback() -> Self {
        Self {
            recommendations: vec![RebalancingRecommendation {
                action: "review".to_string(),
                asset_class: "Overall Portfolio".to_string(),
                current_allocation: "Current".to_string(),
                recommended_allocation: "To be determined".to_string(),
                reasoning: "Automated analysis is unavailable right now. Review the allocation \
                            together with the client at the next meeting."
                    .to_string(),
            }],
            risk_assessment: "Risk could not be assessed automatically.".to_string(),
            expected_impact: "Pending manual review.".to_string(),
            timeframe: "Next scheduled portfolio review".to_string(),
        }
    }
}

/// Models sometimes send percentages as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        _ => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parses a model reply, falling back to [`RebalancingPlan::fallback`].
pub fn parse_rebalancing_reply(raw: &str) -> RebalancingPlan {
    match serde_json::from_str::<RebalancingPlan>(strip_code_fences(raw)) {
        Ok(plan) => plan,
        Err(err) => {
            warn!("Rebalancing reply is not a valid plan, using fallback: {}", err);
            RebalancingPlan::fallback()
        }
    }
}

fn system_prompt(template: &str, context: &AdvisoryContext) -> String {
    template.replace("{context}", &context_for(context))
}

#[async_trait]
pub trait AdvisorServiceTrait: Send + Sync {
    /// Answers one advisor question about the client.
    async fn chat(&self, context: &AdvisoryContext, message: &str) -> Result<String, AiError>;
    /// Request failures are errors; unreadable replies yield the fallback plan.
    async fn rebalancing(&self, context: &AdvisoryContext) -> Result<RebalancingPlan, AiError>;
}

pub struct AdvisorService {
    provider: Arc<dyn CompletionProviderTrait>,
}

impl AdvisorService {
    pub fn new(provider: Arc<dyn CompletionProviderTrait>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AdvisorServiceTrait for AdvisorService {
    async fn chat(&self, context: &AdvisoryContext, message: &str) -> Result<String, AiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AiError::invalid_input("Message cannot be empty"));
        }
        debug!("Advisor chat for client {}", context.client.client_id);

        let reply = self
            .provider
            .complete(CompletionRequest {
                system_prompt: system_prompt(CHAT_PROMPT, context),
                user_message: message.to_string(),
                max_tokens: CHAT_MAX_TOKENS,
                temperature: CHAT_TEMPERATURE,
                json_mode: false,
            })
            .await?;

        if reply.trim().is_empty() {
            return Ok(CHAT_APOLOGY.to_string());
        }
        Ok(reply)
    }

    async fn rebalancing(&self, context: &AdvisoryContext) -> Result<RebalancingPlan, AiError> {
        debug!("Rebalancing request for client {}", context.client.client_id);
        let reply = self
            .provider
            .complete(CompletionRequest {
                system_prompt: system_prompt(REBALANCING_PROMPT, context),
                user_message: REBALANCING_REQUEST.to_string(),
                max_tokens: REBALANCING_MAX_TOKENS,
                temperature: REBALANCING_TEMPERATURE,
                json_mode: true,
            })
            .await?;
        Ok(parse_rebalancing_reply(&reply))
    }
}
