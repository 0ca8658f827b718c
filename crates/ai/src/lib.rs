//! WealthDesk AI - advisor chat and rebalancing over hosted LLM endpoints.
//!
//! The backend never reasons about portfolios itself. It renders a plain-text
//! client context, wraps it in a prompt, and forwards it to a completion
//! endpoint behind [`CompletionProviderTrait`].
//!
//! - `context`: client context block
//! - `provider`: the completion seam, configuration and the scripted fake
//! - `azure`: Azure deployment REST client
//! - `openai`: OpenAI-compatible client built on rig-core
//! - `advisor`: chat replies and rebalancing plans with fallback

pub mod advisor;
pub mod azure;
pub mod context;
pub mod error;
pub mod openai;
pub mod provider;


pub use advisor::{
    parse_rebalancing_reply, strip_code_fences, AdvisorService, AdvisorServiceTrait,
    RebalancingPlan, RebalancingRecommendation, CHAT_APOLOGY,
};
pub use azure::AzureOpenAiProvider;
pub use context::build_client_context;
pub use error::AiError;
pub use openai::OpenAiCompatibleProvider;
pub use provider::{
    build_provider, AiConfig, CompletionProviderTrait, CompletionRequest,
    FakeCompletionProvider, ProviderKind,
};
