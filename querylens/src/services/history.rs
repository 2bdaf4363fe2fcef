use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::{QueryLensError, Result};
use crate::models::HistoryEntry;

/// Validating front for the history store.
#[derive(Clone)]
pub struct HistoryService {
    db: Arc<dyn DatabaseBackend>,
    display_limit: u32,
}

impl HistoryService {
    pub fn new(db: Arc<dyn DatabaseBackend>, display_limit: u32) -> Self {
        Self {
            db,
            display_limit: display_limit.max(1),
        }
    }

    pub fn display_limit(&self) -> u32 {
        self.display_limit
    }

    /// Record `query`. Rejected before touching storage when empty, and also
    /// when it is whitespace only (`"   "` is refused, not stored).
    pub async fn append(&self, query: &str) -> Result<HistoryEntry> {
        if query.trim().is_empty() {
            return Err(QueryLensError::Validation("Query is required".to_string()));
        }

        let entry = self.db.append_history(query).await?;
        tracing::debug!(id = entry.id, query_len = query.len(), "History entry recorded");
        Ok(entry)
    }

    /// Newest entries first, at most the configured display limit.
    pub async fn recent(&self) -> Result<Vec<HistoryEntry>> {
        self.db.recent_history(self.display_limit).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.db.count_history().await
    }
}
