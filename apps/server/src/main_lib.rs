use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wealthdesk_ai::{build_provider, AdvisorService, AdvisorServiceTrait, CompletionProviderTrait};
use wealthdesk_core::{
    chat::{ChatService, ChatServiceTrait},
    clients::{ClientService, ClientServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    glossary::{GlossaryService, GlossaryServiceTrait},
    imports::ImportService,
    insights::{MarketInsightService, MarketInsightServiceTrait},
    portfolios::{PortfolioService, PortfolioServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use wealthdesk_storage_sqlite::{
    db, ChatRepository, ClientRepository, GlossaryRepository, MarketInsightRepository,
    PortfolioRepository, TransactionRepository,
};
use wealthdesk_translation::{MicrosoftTranslator, TranslationServiceTrait};

pub struct AppState {
    pub client_service: Arc<dyn ClientServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub chat_service: Arc<dyn ChatServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub insight_service: Arc<dyn MarketInsightServiceTrait>,
    pub glossary_service: Arc<dyn GlossaryServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub import_service: Arc<ImportService>,
    pub advisor_service: Arc<dyn AdvisorServiceTrait>,
    pub translation_service: Arc<dyn TranslationServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("WD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init also installs the `log` bridge for the library crates.
    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

/// Wires the production AI and translation clients from `config`.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let completion = build_provider(&config.ai)?;
    tracing::info!("AI provider: {}", config.ai.provider.as_str());
    if config.ai.api_key.is_none() {
        tracing::warn!("WD_AI_API_KEY is not set; chat and rebalancing requests will fail");
    }
    let translator: Arc<dyn TranslationServiceTrait> =
        Arc::new(MicrosoftTranslator::new(config.translator.clone())?);
    build_state_with(config, completion, translator).await
}

/// Composition root with injectable external collaborators.
pub async fn build_state_with(
    config: &Config,
    completion: Arc<dyn CompletionProviderTrait>,
    translation_service: Arc<dyn TranslationServiceTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let client_repo = Arc::new(ClientRepository::new(pool.clone(), writer.clone()));
    let portfolio_repo = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let chat_repo = Arc::new(ChatRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let insight_repo = Arc::new(MarketInsightRepository::new(pool.clone(), writer.clone()));
    let glossary_repo = Arc::new(GlossaryRepository::new(pool.clone(), writer.clone()));

    let client_service: Arc<dyn ClientServiceTrait> = Arc::new(ClientService::new(client_repo));
    let portfolio_service: Arc<dyn PortfolioServiceTrait> =
        Arc::new(PortfolioService::new(portfolio_repo));
    let chat_service: Arc<dyn ChatServiceTrait> = Arc::new(ChatService::new(chat_repo));
    let transaction_service: Arc<dyn TransactionServiceTrait> =
        Arc::new(TransactionService::new(transaction_repo));
    let insight_service: Arc<dyn MarketInsightServiceTrait> =
        Arc::new(MarketInsightService::new(insight_repo));
    let glossary_service: Arc<dyn GlossaryServiceTrait> =
        Arc::new(GlossaryService::new(glossary_repo));

    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        client_service.clone(),
        portfolio_service.clone(),
        chat_service.clone(),
    ));
    let import_service = Arc::new(ImportService::new(
        client_service.clone(),
        transaction_service.clone(),
        insight_service.clone(),
        glossary_service.clone(),
    ));
    let advisor_service: Arc<dyn AdvisorServiceTrait> = Arc::new(AdvisorService::new(completion));

    Ok(Arc::new(AppState {
        client_service,
        portfolio_service,
        chat_service,
        transaction_service,
        insight_service,
        glossary_service,
        dashboard_service,
        import_service,
        advisor_service,
        translation_service,
    }))
}
