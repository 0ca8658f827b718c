//! Market insights module - house views published to every client.

mod insights_model;
mod insights_service;
mod insights_traits;

pub use insights_model::{InsightPriority, MarketInsight, NewMarketInsight};
pub use insights_service::MarketInsightService;
pub use insights_traits::{MarketInsightRepositoryTrait, MarketInsightServiceTrait};
