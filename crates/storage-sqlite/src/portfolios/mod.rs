mod model;
mod repository;

pub use model::{
    AssetAllocationChangeset, AssetAllocationDB, NewAssetAllocationDB, NewPortfolioDB,
    NewPortfolioPerformanceDB, PortfolioChangeset, PortfolioDB, PortfolioPerformanceDB,
};
pub use repository::PortfolioRepository;
