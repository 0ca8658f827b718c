use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use wealthdesk_translation::TranslateRequest;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody {
    text: String,
    target_language: String,
    source_language: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

fn check_language(field: &str, code: &str) -> ApiResult<()> {
    let code = code.trim();
    if !(2..=5).contains(&code.chars().count()) {
        return Err(ApiError::BadRequest(format!(
            "{} must be 2 to 5 characters",
            field
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return Err(ApiError::BadRequest(format!(
            "{} may only contain letters and '-'",
            field
        )));
    }
    Ok(())
}

async fn translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> ApiResult<Json<TranslateResponse>> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text cannot be empty".to_string()));
    }
    check_language("targetLanguage", &body.target_language)?;
    if let Some(source) = &body.source_language {
        check_language("sourceLanguage", source)?;
    }

    let translated_text = state
        .translation_service
        .translate(TranslateRequest {
            text: body.text,
            target_language: body.target_language.trim().to_lowercase(),
            source_language: body.source_language.map(|s| s.trim().to_lowercase()),
        })
        .await;
    Ok(Json(TranslateResponse { translated_text }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/translate", post(translate))
}
