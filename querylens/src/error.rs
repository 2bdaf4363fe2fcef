use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryLensError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] libsql::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream authentication error: {0}")]
    UpstreamAuth(String),

    #[error("Upstream rate limit exceeded, retry after {retry_after:?} seconds")]
    UpstreamRateLimit { retry_after: Option<u64> },

    #[error("Search provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl QueryLensError {
    /// True for every failure originating at the search provider.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            QueryLensError::Upstream(_)
                | QueryLensError::UpstreamAuth(_)
                | QueryLensError::UpstreamRateLimit { .. }
                | QueryLensError::UpstreamUnavailable(_)
        )
    }
}

impl IntoResponse for QueryLensError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            QueryLensError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            QueryLensError::UpstreamRateLimit { retry_after } => {
                let msg = match retry_after {
                    Some(secs) => format!("Search provider is busy, retry after {secs} seconds"),
                    None => "Search provider is busy, please try again later".to_string(),
                };
                (StatusCode::TOO_MANY_REQUESTS, msg)
            }
            upstream @ (QueryLensError::Upstream(_)
            | QueryLensError::UpstreamAuth(_)
            | QueryLensError::UpstreamUnavailable(_)) => {
                tracing::error!(error = %upstream, "Search provider failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch results. Please try again.".to_string(),
                )
            }
            internal @ (QueryLensError::Persistence(_) | QueryLensError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, QueryLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request() {
        let response = QueryLensError::Validation("Query is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Query is required");
        assert_eq!(json["code"], 400);
    }

    #[tokio::test]
    async fn upstream_failure_does_not_leak_details() {
        let response =
            QueryLensError::UpstreamAuth("API key not valid: AIza...".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = body_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(!message.contains("AIza"));
    }

    #[tokio::test]
    async fn rate_limit_maps_to_too_many_requests() {
        let response = QueryLensError::UpstreamRateLimit {
            retry_after: Some(12),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("12"));
    }

    #[tokio::test]
    async fn internal_error_is_generic() {
        let response = QueryLensError::Internal("stack trace here".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "An internal error occurred");
    }

    #[test]
    fn upstream_classification() {
        assert!(QueryLensError::Upstream("x".into()).is_upstream());
        assert!(QueryLensError::UpstreamUnavailable("x".into()).is_upstream());
        assert!(QueryLensError::UpstreamRateLimit { retry_after: None }.is_upstream());
        assert!(!QueryLensError::Validation("x".into()).is_upstream());
        assert!(!QueryLensError::Internal("x".into()).is_upstream());
    }
}
