use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use wealthdesk_core::insights::{MarketInsight, NewMarketInsight};

async fn list_insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MarketInsight>>> {
    Ok(Json(state.insight_service.list_insights(None)?))
}

async fn create_insight(
    State(state): State<Arc<AppState>>,
    Json(insight): Json<NewMarketInsight>,
) -> ApiResult<(StatusCode, Json<MarketInsight>)> {
    let created = state.insight_service.create_insight(insight).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market-insights", get(list_insights).post(create_insight))
}
