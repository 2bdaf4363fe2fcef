use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::HistoryRepository;
use crate::db::traits::{DatabaseBackend, HistoryStore};
use crate::error::Result;
use crate::models::HistoryEntry;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryStore for LibSqlBackend {
    async fn append_history(&self, query: &str) -> Result<HistoryEntry> {
        let conn = self.db.connect()?;
        HistoryRepository::append(&conn, query).await
    }
    async fn recent_history(&self, limit: u32) -> Result<Vec<HistoryEntry>> {
        let conn = self.db.connect()?;
        HistoryRepository::recent(&conn, limit).await
    }
    async fn count_history(&self) -> Result<u64> {
        let conn = self.db.connect()?;
        HistoryRepository::count(&conn).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
