use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::patch,
    Json, Router,
};
use wealthdesk_core::portfolios::{
    AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioUpdate,
};

async fn update_portfolio(
    Path(portfolio_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<PortfolioUpdate>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .update_portfolio(portfolio_id, update)
        .await?;
    Ok(Json(portfolio))
}

async fn update_allocation(
    Path(allocation_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<AssetAllocationUpdate>,
) -> ApiResult<Json<AssetAllocation>> {
    let allocation = state
        .portfolio_service
        .update_allocation(allocation_id, update)
        .await?;
    Ok(Json(allocation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios/{id}", patch(update_portfolio))
        .route("/allocations/{id}", patch(update_allocation))
}
