use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/history",
            get(handlers::history::list_history).post(handlers::history::create_history),
        )
        .route("/search", post(handlers::search::search))
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router());

    let mut router = Router::new().nest("/api", api);

    // Unknown paths fall back to index.html so client-side routes resolve.
    if let Some(dir) = state.config.server.static_dir.as_deref() {
        let index = Path::new(dir).join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
