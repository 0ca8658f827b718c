use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

use super::client_sheet::client_seed_from_row;
use super::column_mapping::{ColumnMap, SourceFormat};
use super::imports_errors::ImportError;
use super::imports_model::{
    ImportSummary, ReferenceSeedSummary, RowFailure, TransactionImportSummary,
};
use super::persona::persona_seed_from_row;
use super::reference_data::{demo_client_seeds, glossary_seed, market_insight_seed};
use super::sheet::SheetTable;
use super::transaction_sheet::transaction_from_row;
use crate::clients::{ClientSeed, ClientServiceTrait};
use crate::errors::{Error, Result};
use crate::glossary::GlossaryServiceTrait;
use crate::insights::MarketInsightServiceTrait;
use crate::transactions::TransactionServiceTrait;

/// Client seeds mapped from a sheet, not yet written.
#[derive(Debug, Clone, Default)]
pub struct SeedPlan {
    /// Seeds with the source line they came from
    pub seeds: Vec<(usize, ClientSeed)>,
    pub failures: Vec<RowFailure>,
}

impl SeedPlan {
    /// Checks the header of `table` against `format` and maps every row.
    ///
    /// A header mismatch fails the whole plan. Rows that cannot be mapped,
    /// and repeated client ids after their first occurrence, end up in
    /// `failures`.
    pub fn build<R: Rng + ?Sized>(
        format: SourceFormat,
        table: &SheetTable,
        rng: &mut R,
    ) -> Result<Self> {
        let id_field = match format {
            SourceFormat::ClientSheet => "client_id",
            SourceFormat::PersonaPortfolios => "masked_client_id",
            SourceFormat::Transactions => {
                return Err(ImportError::UnsupportedFile(
                    "transactions do not create clients".to_string(),
                )
                .into())
            }
        };
        let map = ColumnMap::resolve(format, &table.headers)?;

        let mut plan = SeedPlan::default();
        let mut seen = HashSet::new();
        for (line, cells) in table.data_rows() {
            let row = map.row(line, cells);
            let mapped = match format {
                SourceFormat::PersonaPortfolios => persona_seed_from_row(&row, rng),
                _ => client_seed_from_row(&row, rng),
            };
            match mapped {
                Ok(seed) => {
                    if seen.insert(seed.client.client_id.clone()) {
                        plan.seeds.push((line, seed));
                    } else {
                        plan.failures.push(RowFailure {
                            line,
                            client_id: Some(seed.client.client_id.to_string()),
                            message: "client id repeats an earlier row".to_string(),
                        });
                    }
                }
                Err(err) => plan.failures.push(RowFailure {
                    line,
                    client_id: row.owned_text(id_field),
                    message: err.to_string(),
                }),
            }
        }
        Ok(plan)
    }
}

/// Runs the batch imports on top of the domain services.
pub struct ImportService {
    client_service: Arc<dyn ClientServiceTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    insight_service: Arc<dyn MarketInsightServiceTrait>,
    glossary_service: Arc<dyn GlossaryServiceTrait>,
}

impl ImportService {
    pub fn new(
        client_service: Arc<dyn ClientServiceTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        insight_service: Arc<dyn MarketInsightServiceTrait>,
        glossary_service: Arc<dyn GlossaryServiceTrait>,
    ) -> Self {
        Self {
            client_service,
            transaction_service,
            insight_service,
            glossary_service,
        }
    }

    /// Imports clients from a client sheet or persona export.
    ///
    /// With `reseed`, existing client data is removed once the header has
    /// been accepted and before the first row is written.
    pub async fn import_clients(
        &self,
        format: SourceFormat,
        table: &SheetTable,
        reseed: bool,
    ) -> Result<ImportSummary> {
        let plan = {
            let mut rng = StdRng::from_entropy();
            SeedPlan::build(format, table, &mut rng)?
        };
        self.apply_seed_plan(plan, reseed).await
    }

    pub async fn apply_seed_plan(&self, plan: SeedPlan, reseed: bool) -> Result<ImportSummary> {
        if reseed {
            self.client_service.reset_client_data().await?;
        }

        let mut summary = ImportSummary::default();
        for failure in plan.failures {
            warn!("Skipping row {}: {}", failure.line, failure.message);
            summary.push_failure(failure);
        }

        for (line, seed) in plan.seeds {
            let client_id = seed.client.client_id.to_string();
            match self.client_service.create_seeded_client(seed).await {
                Ok(seeded) => {
                    summary.imported += 1;
                    summary.clients.push(seeded.client);
                }
                Err(err) => {
                    warn!("Skipping row {} ({}): {}", line, client_id, err);
                    summary.push_failure(RowFailure {
                        line,
                        client_id: Some(client_id),
                        message: err.to_string(),
                    });
                }
            }
        }
        summary.failures.sort_by_key(|failure| failure.line);

        info!(
            "Client import finished: {} imported, {} skipped",
            summary.imported, summary.skipped
        );
        Ok(summary)
    }

    pub async fn import_transactions(&self, table: &SheetTable) -> Result<TransactionImportSummary> {
        let map = ColumnMap::resolve(SourceFormat::Transactions, &table.headers)?;

        let mut summary = TransactionImportSummary::default();
        let mut rows = Vec::new();
        for (line, cells) in table.data_rows() {
            let row = map.row(line, cells);
            match transaction_from_row(&row) {
                Ok(transaction) => rows.push(transaction),
                Err(err) => {
                    warn!("Skipping transaction row {}: {}", line, err);
                    summary.skipped += 1;
                    summary.failures.push(RowFailure {
                        line,
                        client_id: row.owned_text("client_id"),
                        message: err.to_string(),
                    });
                }
            }
        }

        let mapped = rows.len();
        summary.imported = self.transaction_service.import_transactions(rows).await?;
        summary.skipped += mapped - summary.imported.min(mapped);
        Ok(summary)
    }

    /// Loads market insights into an empty table and adds any glossary terms
    /// that are missing. Safe to run repeatedly.
    pub async fn seed_reference_data(&self) -> Result<ReferenceSeedSummary> {
        let mut summary = ReferenceSeedSummary::default();

        if self.insight_service.list_insights(Some(1))?.is_empty() {
            for insight in market_insight_seed() {
                self.insight_service.create_insight(insight).await?;
                summary.market_insights += 1;
            }
        } else {
            debug!("Market insights already present, leaving them untouched");
        }

        for term in glossary_seed() {
            match self.glossary_service.create_term(term).await {
                Ok(_) => summary.glossary_terms += 1,
                Err(Error::ConstraintViolation(msg)) => debug!("{}", msg),
                Err(err) => return Err(err),
            }
        }

        info!(
            "Seeded {} market insights and {} glossary terms",
            summary.market_insights, summary.glossary_terms
        );
        Ok(summary)
    }

    /// Creates the demo clients that do not exist yet.
    pub async fn seed_demo_clients(&self) -> Result<ImportSummary> {
        let seeds = {
            let mut rng = StdRng::from_entropy();
            demo_client_seeds(&mut rng)?
        };
        let plan = SeedPlan {
            seeds: seeds.into_iter().enumerate().map(|(i, s)| (i + 1, s)).collect(),
            failures: Vec::new(),
        };
        self.apply_seed_plan(plan, false).await
    }
}
