use async_trait::async_trait;
use std::sync::Arc;

use super::insights_model::{MarketInsight, NewMarketInsight};
use super::insights_traits::{MarketInsightRepositoryTrait, MarketInsightServiceTrait};
use crate::constants::{DEFAULT_INSIGHTS_LIMIT, MAX_LIST_LIMIT};
use crate::errors::Result;

pub struct MarketInsightService {
    repository: Arc<dyn MarketInsightRepositoryTrait>,
}

impl MarketInsightService {
    pub fn new(repository: Arc<dyn MarketInsightRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl MarketInsightServiceTrait for MarketInsightService {
    fn list_insights(&self, limit: Option<i64>) -> Result<Vec<MarketInsight>> {
        let limit = limit
            .unwrap_or(DEFAULT_INSIGHTS_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        self.repository.list(limit)
    }

    async fn create_insight(&self, insight: NewMarketInsight) -> Result<MarketInsight> {
        insight.validate()?;
        self.repository.create(insight).await
    }
}
