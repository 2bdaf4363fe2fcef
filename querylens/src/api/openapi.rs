use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QueryLens API",
        version = "0.1.0",
        description = "Grounded web answers with citations, follow-up questions and a recent-query history.",
    ),
    paths(
        handlers::health::health_check,
        handlers::history::list_history,
        handlers::history::create_history,
        handlers::search::search,
    ),
    components(schemas(
        models::HistoryEntry,
        models::Source,
        models::SearchResponse,
        dto::HistoryRequest,
        dto::CreatedHistoryEntry,
        dto::SearchRequest,
        dto::ErrorBody,
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::SearchStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "history", description = "Recent-query history"),
        (name = "search", description = "Grounded search with citations"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
