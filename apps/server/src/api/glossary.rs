use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use wealthdesk_core::glossary::{GlossaryTerm, NewGlossaryTerm};

#[derive(Deserialize, Default)]
struct LanguageQuery {
    language: Option<String>,
}

async fn list_terms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
) -> ApiResult<Json<Vec<GlossaryTerm>>> {
    let terms = state
        .glossary_service
        .list_terms(query.language.as_deref())?;
    Ok(Json(terms))
}

async fn get_term(
    Path(term): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
) -> ApiResult<Json<GlossaryTerm>> {
    state
        .glossary_service
        .get_term(&term, query.language.as_deref())?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Term"))
}

async fn create_term(
    State(state): State<Arc<AppState>>,
    Json(term): Json<NewGlossaryTerm>,
) -> ApiResult<(StatusCode, Json<GlossaryTerm>)> {
    let created = state.glossary_service.create_term(term).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/glossary", get(list_terms).post(create_term))
        .route("/glossary/{term}", get(get_term))
}
