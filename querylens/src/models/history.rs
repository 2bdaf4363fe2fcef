use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded query. `id` and `timestamp` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HistoryEntry {
    pub id: i64,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}
