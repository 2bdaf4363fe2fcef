use serde::{Deserialize, Serialize};

/// Body of `POST /api/history`. `query` is optional on the wire so that a
/// missing field gets the same answer as an empty one.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct HistoryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Acknowledgement for a recorded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatedHistoryEntry {
    pub id: i64,
    pub query: String,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}
