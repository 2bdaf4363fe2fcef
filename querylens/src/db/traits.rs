use async_trait::async_trait;

use crate::error::Result;
use crate::models::HistoryEntry;

/// Append-only log of submitted queries.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist `query` and return the stored entry with its assigned id and
    /// timestamp. Callers are expected to have rejected empty queries.
    async fn append_history(&self, query: &str) -> Result<HistoryEntry>;

    /// Up to `limit` entries, most recent first.
    async fn recent_history(&self, limit: u32) -> Result<Vec<HistoryEntry>>;

    async fn count_history(&self) -> Result<u64>;
}

/// A complete database backend: the history store plus lifecycle operations.
#[async_trait]
pub trait DatabaseBackend: HistoryStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
