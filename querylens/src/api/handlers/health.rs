use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::search::SearchBackend;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub search: SearchStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DatabaseStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_entries: Option<u64>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SearchStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `GET /api/health`
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match state.history.count().await {
        Ok(count) => DatabaseStatus {
            status: "ok".to_string(),
            history_entries: Some(count),
        },
        Err(error) => {
            tracing::warn!(error = %error, "Health check could not read history");
            DatabaseStatus {
                status: "error".to_string(),
                history_entries: None,
            }
        }
    };

    let search = match state.search.provider().backend() {
        SearchBackend::Gemini { model } => SearchStatus {
            status: "available".to_string(),
            model: Some(model.clone()),
            reason: None,
        },
        SearchBackend::Unavailable { reason } => SearchStatus {
            status: "unavailable".to_string(),
            model: None,
            reason: Some(reason.clone()),
        },
    };

    let status = if database.status == "ok" { "ok" } else { "degraded" };

    Json(HealthData {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        search,
    })
}
