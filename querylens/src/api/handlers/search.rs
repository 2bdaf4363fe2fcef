//! `POST /api/search`: grounded answer with citations and follow-ups.

use axum::extract::State;
use axum::Json;

use crate::api::dto::{ErrorBody, SearchRequest};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;
use crate::models::SearchResponse;

#[utoipa::path(
    post,
    path = "/api/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Decomposed answer", body = SearchResponse),
        (status = 400, description = "Missing or empty query", body = ErrorBody),
        (status = 429, description = "Search provider rate limit", body = ErrorBody),
        (status = 502, description = "Search provider failure", body = ErrorBody),
    )
)]
pub async fn search(
    State(state): State<AppState>,
    AppJson(req): AppJson<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let response = state.search.search(&req.query).await?;
    Ok(Json(response))
}
