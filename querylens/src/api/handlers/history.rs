//! `/api/history` handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::{CreatedHistoryEntry, ErrorBody, HistoryRequest};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::QueryLensError;
use crate::models::HistoryEntry;

/// `GET /api/history`
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 200, description = "Most recent queries, newest first", body = Vec<HistoryEntry>),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, Response> {
    state
        .history
        .recent()
        .await
        .map(Json)
        .map_err(|error| storage_failure(error, "Failed to fetch history"))
}

/// `POST /api/history`
#[utoipa::path(
    post,
    path = "/api/history",
    tag = "history",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "Query recorded", body = CreatedHistoryEntry),
        (status = 400, description = "Missing or empty query", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn create_history(
    State(state): State<AppState>,
    AppJson(req): AppJson<HistoryRequest>,
) -> Result<Json<CreatedHistoryEntry>, Response> {
    let query = req.query.unwrap_or_default();

    let entry = state
        .history
        .append(&query)
        .await
        .map_err(|error| storage_failure(error, "Failed to save history"))?;

    Ok(Json(CreatedHistoryEntry {
        id: entry.id,
        query: entry.query,
    }))
}

/// Storage failures get an endpoint-specific message. Everything else keeps
/// its usual mapping.
fn storage_failure(error: QueryLensError, message: &str) -> Response {
    match error {
        QueryLensError::Persistence(_) | QueryLensError::Internal(_) => {
            tracing::error!(error = %error, "{}", message);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let body = ErrorBody {
                error: message.to_string(),
                code: status.as_u16(),
            };
            (status, Json(body)).into_response()
        }
        other => other.into_response(),
    }
}
