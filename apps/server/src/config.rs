use anyhow::Context;
use std::{net::SocketAddr, time::Duration};
use wealthdesk_ai::{AiConfig, ProviderKind};
use wealthdesk_translation::TranslatorConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub ai: AiConfig,
    pub translator: TranslatorConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and blank variables both count as absent.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("WD_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid WD_LISTEN_ADDR")?;
        let db_path = env_or("WD_DB_PATH", "./db/app.db");
        let cors_allow = env_or("WD_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("WD_REQUEST_TIMEOUT_MS", "120000")
            .parse()
            .unwrap_or(120_000);
        let static_dir = env_or("WD_STATIC_DIR", "dist");

        let ai_defaults = AiConfig::default();
        let ai = AiConfig {
            provider: ProviderKind::parse(&env_or("WD_AI_PROVIDER", "azure"))
                .context("Invalid WD_AI_PROVIDER")?,
            api_key: env_opt("WD_AI_API_KEY"),
            endpoint: env_opt("WD_AI_ENDPOINT"),
            api_version: env_opt("WD_AI_API_VERSION").unwrap_or(ai_defaults.api_version),
            model: env_opt("WD_AI_MODEL").unwrap_or(ai_defaults.model),
        };

        let translator_defaults = TranslatorConfig::default();
        let translator = TranslatorConfig {
            api_key: env_opt("WD_TRANSLATOR_KEY"),
            endpoint: env_opt("WD_TRANSLATOR_ENDPOINT").unwrap_or(translator_defaults.endpoint),
            region: env_opt("WD_TRANSLATOR_REGION").unwrap_or(translator_defaults.region),
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            ai,
            translator,
        })
    }
}
