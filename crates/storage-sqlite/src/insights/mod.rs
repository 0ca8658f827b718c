mod model;
mod repository;

pub use model::{MarketInsightDB, NewMarketInsightDB};
pub use repository::MarketInsightRepository;
