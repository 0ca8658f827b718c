use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use wealthdesk_core::clients::ClientService;
use wealthdesk_core::glossary::GlossaryService;
use wealthdesk_core::imports::{read_sheet_file, ImportService, ImportSummary, SourceFormat};
use wealthdesk_core::insights::MarketInsightService;
use wealthdesk_core::transactions::TransactionService;
use wealthdesk_storage_sqlite::{
    open, ClientRepository, GlossaryRepository, MarketInsightRepository, TransactionRepository,
};

#[derive(Parser)]
#[command(name = "wealthdesk-import", version, about = "Seed and import WealthDesk data")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "WD_DB_PATH", default_value = "./db/app.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a client sheet (CSV or Excel)
    Clients {
        file: PathBuf,
        /// Remove all client data before importing
        #[arg(long)]
        reseed: bool,
    },
    /// Import a masked persona export, replacing existing clients
    Personas {
        file: PathBuf,
        /// Keep existing clients instead of replacing them
        #[arg(long)]
        keep: bool,
    },
    /// Import an order book export
    Transactions { file: PathBuf },
    /// Load market insights and glossary terms
    ReferenceData {
        #[arg(long)]
        with_demo_clients: bool,
    },
}

fn build_import_service(db: &Path) -> anyhow::Result<ImportService> {
    let path = db
        .to_str()
        .context("database path is not valid UTF-8")?;
    let (pool, writer) = open(path).with_context(|| format!("opening database {}", path))?;

    let clients = Arc::new(ClientService::new(Arc::new(ClientRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let transactions = Arc::new(TransactionService::new(Arc::new(
        TransactionRepository::new(pool.clone(), writer.clone()),
    )));
    let insights = Arc::new(MarketInsightService::new(Arc::new(
        MarketInsightRepository::new(pool.clone(), writer.clone()),
    )));
    let glossary = Arc::new(GlossaryService::new(Arc::new(GlossaryRepository::new(
        pool, writer,
    ))));
    Ok(ImportService::new(clients, transactions, insights, glossary))
}

fn report(summary: &ImportSummary) {
    for failure in &summary.failures {
        tracing::warn!(
            "row {} ({}): {}",
            failure.line,
            failure.client_id.as_deref().unwrap_or("-"),
            failure.message
        );
    }
    println!(
        "Imported {} clients, skipped {}",
        summary.imported, summary.skipped
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();
    let service = build_import_service(&cli.db)?;

    match cli.command {
        Command::Clients { file, reseed } => {
            let table = read_sheet_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let summary = service
                .import_clients(SourceFormat::ClientSheet, &table, reseed)
                .await?;
            report(&summary);
        }
        Command::Personas { file, keep } => {
            let table = read_sheet_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let summary = service
                .import_clients(SourceFormat::PersonaPortfolios, &table, !keep)
                .await?;
            report(&summary);
        }
        Command::Transactions { file } => {
            let table = read_sheet_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let summary = service.import_transactions(&table).await?;
            for failure in &summary.failures {
                tracing::warn!("row {}: {}", failure.line, failure.message);
            }
            println!(
                "Imported {} transactions, skipped {}",
                summary.imported, summary.skipped
            );
        }
        Command::ReferenceData { with_demo_clients } => {
            let summary = service.seed_reference_data().await?;
            println!(
                "Seeded {} market insights and {} glossary terms",
                summary.market_insights, summary.glossary_terms
            );
            if with_demo_clients {
                report(&service.seed_demo_clients().await?);
            }
        }
    }
    Ok(())
}
