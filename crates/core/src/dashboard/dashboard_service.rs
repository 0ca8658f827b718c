use log::debug;
use std::sync::Arc;

use super::bundle::{AdvisoryContext, ClientBundle};
use super::report::ClientReport;
use super::scorecard::{build_scorecard, Scorecard};
use crate::chat::ChatServiceTrait;
use crate::clients::{ClientId, ClientServiceTrait};
use crate::constants::{BUNDLE_CHAT_HISTORY_LIMIT, MAX_LIST_LIMIT};
use crate::errors::{Error, Result};
use crate::portfolios::PortfolioServiceTrait;
use crate::utils::time_utils::now_naive;

/// Trait for the per-client read models
pub trait DashboardServiceTrait: Send + Sync {
    fn get_client_bundle(&self, client_id: &ClientId) -> Result<Option<ClientBundle>>;
    fn get_advisory_context(&self, client_id: &ClientId) -> Result<Option<AdvisoryContext>>;
    fn get_client_report(&self, client_id: &ClientId) -> Result<Option<ClientReport>>;
    /// Fails with `NotFound` when the client or its portfolio is missing.
    fn get_scorecard(&self, client_id: &ClientId) -> Result<Scorecard>;
}

pub struct DashboardService {
    client_service: Arc<dyn ClientServiceTrait>,
    portfolio_service: Arc<dyn PortfolioServiceTrait>,
    chat_service: Arc<dyn ChatServiceTrait>,
}

impl DashboardService {
    pub fn new(
        client_service: Arc<dyn ClientServiceTrait>,
        portfolio_service: Arc<dyn PortfolioServiceTrait>,
        chat_service: Arc<dyn ChatServiceTrait>,
    ) -> Self {
        Self {
            client_service,
            portfolio_service,
            chat_service,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_client_bundle(&self, client_id: &ClientId) -> Result<Option<ClientBundle>> {
        let Some(client) = self.client_service.get_client(client_id)? else {
            return Ok(None);
        };
        let portfolio = self.portfolio_service.get_client_portfolio(client_id)?;
        let (asset_allocations, performance) = match &portfolio {
            Some(p) => (
                self.portfolio_service.get_allocations(p.id)?,
                self.portfolio_service.get_performance(p.id, None)?,
            ),
            None => (Vec::new(), Vec::new()),
        };
        let chat_history = self
            .chat_service
            .get_history(client_id, Some(BUNDLE_CHAT_HISTORY_LIMIT))?;

        debug!(
            "Loaded bundle for {}: {} allocations, {} performance rows",
            client_id,
            asset_allocations.len(),
            performance.len()
        );
        Ok(Some(ClientBundle {
            client,
            portfolio,
            asset_allocations,
            performance,
            chat_history,
        }))
    }

    fn get_advisory_context(&self, client_id: &ClientId) -> Result<Option<AdvisoryContext>> {
        let Some(client) = self.client_service.get_client(client_id)? else {
            return Ok(None);
        };
        let portfolio = self.portfolio_service.get_client_portfolio(client_id)?;
        let allocations = match &portfolio {
            Some(p) => self.portfolio_service.get_allocations(p.id)?,
            None => Vec::new(),
        };
        Ok(Some(AdvisoryContext {
            client,
            portfolio,
            allocations,
        }))
    }

    fn get_client_report(&self, client_id: &ClientId) -> Result<Option<ClientReport>> {
        let Some(client) = self.client_service.get_client(client_id)? else {
            return Ok(None);
        };
        let portfolio = self.portfolio_service.get_client_portfolio(client_id)?;
        let (allocations, performance) = match &portfolio {
            Some(p) => (
                self.portfolio_service.get_allocations(p.id)?,
                self.portfolio_service
                    .get_performance(p.id, Some(MAX_LIST_LIMIT))?,
            ),
            None => (Vec::new(), Vec::new()),
        };
        Ok(Some(ClientReport::new(
            client,
            portfolio,
            allocations,
            performance,
            now_naive(),
        )))
    }

    fn get_scorecard(&self, client_id: &ClientId) -> Result<Scorecard> {
        let client = self
            .client_service
            .get_client(client_id)?
            .ok_or_else(|| Error::NotFound("Client not found".to_string()))?;
        let portfolio = self
            .portfolio_service
            .get_client_portfolio(client_id)?
            .ok_or_else(|| Error::NotFound("Portfolio not found".to_string()))?;
        let allocations = self.portfolio_service.get_allocations(portfolio.id)?;
        Ok(build_scorecard(&client, &portfolio, &allocations))
    }
}
