use async_trait::async_trait;

use super::insights_model::{MarketInsight, NewMarketInsight};
use crate::errors::Result;

#[async_trait]
pub trait MarketInsightRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, limit: i64) -> Result<Vec<MarketInsight>>;
    async fn create(&self, insight: NewMarketInsight) -> Result<MarketInsight>;
}

#[async_trait]
pub trait MarketInsightServiceTrait: Send + Sync {
    fn list_insights(&self, limit: Option<i64>) -> Result<Vec<MarketInsight>>;
    async fn create_insight(&self, insight: NewMarketInsight) -> Result<MarketInsight>;
}
