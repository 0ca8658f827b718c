use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wealthdesk_core::chat::{ChatMessage, NewChatMessage};
use wealthdesk_core::ClientId;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    /// String or number
    client_id: ClientId,
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
}

/// Asks the advisor and stores the exchange as one chat row.
async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message cannot be empty".to_string()));
    }

    let context = state
        .dashboard_service
        .get_advisory_context(&body.client_id)?
        .ok_or_else(|| ApiError::not_found("Client"))?;

    let reply = state
        .advisor_service
        .chat(&context, message)
        .await
        .map_err(|e| ApiError::from_ai("Failed to process chat message", e))?;

    let stored = state
        .chat_service
        .record_exchange(NewChatMessage {
            client_id: body.client_id,
            message: message.to_string(),
            response: reply,
        })
        .await
        .map_err(|e| ApiError::failed("Failed to process chat message", e))?;

    Ok(Json(ChatResponse {
        response: stored.response,
    }))
}

async fn chat_history(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let client_id = ClientId::parse(client_id)?;
    if state.client_service.get_client(&client_id)?.is_none() {
        return Err(ApiError::not_found("Client"));
    }
    Ok(Json(state.chat_service.get_history(&client_id, query.limit)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(send_message))
        .route("/clients/{client_id}/chat", get(chat_history))
}
