use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wealthdesk_ai::RebalancingPlan;
use wealthdesk_core::{
    clients::{normalize_experience, normalize_risk_tolerance, Client, NewClient},
    dashboard::{report_file_name, ClientBundle, Scorecard},
    errors::Error as CoreError,
    imports::{read_sheet, RowFailure, SourceFormat},
    transactions::Transaction,
    ClientId,
};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    message: String,
    imported: usize,
    skipped: usize,
    clients: Vec<Client>,
    failures: Vec<RowFailure>,
}

fn parse_client_id(raw: String) -> ApiResult<ClientId> {
    Ok(ClientId::parse(raw)?)
}

async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.client_service.list_clients()?))
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(mut new_client): Json<NewClient>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    new_client.risk_tolerance = normalize_risk_tolerance(&new_client.risk_tolerance).to_string();
    new_client.investment_experience =
        normalize_experience(&new_client.investment_experience).to_string();
    let client = state.client_service.create_client(new_client).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Multipart upload of a client sheet (CSV or XLSX) in field `file`.
async fn import_clients(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file content: {}", e)))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) = upload
        .ok_or_else(|| ApiError::BadRequest("Missing file in multipart request".to_string()))?;
    let table = read_sheet(&bytes, file_name.as_deref()).map_err(CoreError::from)?;
    let summary = state
        .import_service
        .import_clients(SourceFormat::ClientSheet, &table, false)
        .await?;

    Ok(Json(ImportResponse {
        message: format!(
            "Imported {} clients, skipped {} rows",
            summary.imported, summary.skipped
        ),
        imported: summary.imported,
        skipped: summary.skipped,
        clients: summary.clients,
        failures: summary.failures,
    }))
}

async fn get_client_bundle(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClientBundle>> {
    let client_id = parse_client_id(client_id)?;
    state
        .dashboard_service
        .get_client_bundle(&client_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client"))
}

async fn get_rebalancing(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RebalancingPlan>> {
    let client_id = parse_client_id(client_id)?;
    let context = state
        .dashboard_service
        .get_advisory_context(&client_id)?
        .ok_or_else(|| ApiError::not_found("Client"))?;
    let plan = state
        .advisor_service
        .rebalancing(&context)
        .await
        .map_err(|e| ApiError::from_ai("Failed to generate recommendations", e))?;
    Ok(Json(plan))
}

async fn get_transactions(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let client_id = parse_client_id(client_id)?;
    let transactions = state
        .transaction_service
        .get_client_transactions(&client_id, query.limit)?;
    Ok(Json(transactions))
}

async fn get_report(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let client_id = parse_client_id(client_id)?;
    let report = state
        .dashboard_service
        .get_client_report(&client_id)?
        .ok_or_else(|| ApiError::not_found("Client"))?;
    let disposition = format!("attachment; filename=\"{}\"", report_file_name(&client_id));
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(report)))
}

async fn get_scorecard(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Scorecard>> {
    let client_id = parse_client_id(client_id)?;
    Ok(Json(state.dashboard_service.get_scorecard(&client_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/import",
            post(import_clients).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/clients/{client_id}", get(get_client_bundle))
        .route("/clients/{client_id}/rebalancing", get(get_rebalancing))
        .route("/clients/{client_id}/transactions", get(get_transactions))
        .route("/clients/{client_id}/report", get(get_report))
        .route("/clients/{client_id}/scorecard", get(get_scorecard))
}
