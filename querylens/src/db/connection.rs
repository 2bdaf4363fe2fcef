use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

pub struct Database {
    pub(crate) db: Arc<libsql::Database>,
    /// SQLite gives every connection to `:memory:` its own database, so an
    /// in-memory store keeps one connection and hands out clones of it.
    pub(crate) shared_conn: Option<Connection>,
    /// Only embedded replicas have anything to sync.
    pub(crate) replica: bool,
    pub(crate) busy_timeout_ms: u64,
    pub(crate) journal_mode: String,
    pub(crate) synchronous: String,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5000);
        let journal_mode = normalize_journal_mode(
            &std::env::var("DATABASE_JOURNAL_MODE").unwrap_or_else(|_| "WAL".to_string()),
        )
        .to_string();
        let synchronous = normalize_synchronous(
            &std::env::var("DATABASE_SYNCHRONOUS").unwrap_or_else(|_| "NORMAL".to_string()),
        )
        .to_string();

        let in_memory = is_in_memory_url(&config.url);

        let db = if config.is_remote() {
            if let Some(ref local_path) = config.local_path {
                Builder::new_remote_replica(
                    local_path,
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            } else {
                Builder::new_remote(
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            }
        } else if in_memory {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let shared_conn = if in_memory { Some(db.connect()?) } else { None };

        let database = Self {
            db: Arc::new(db),
            shared_conn,
            replica: config.is_embedded_replica(),
            busy_timeout_ms,
            journal_mode,
            synchronous,
        };
        database.configure_database().await?;
        database.init_schema().await?;

        tracing::info!(url = %config.url, in_memory, "History database ready");

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        if let Some(conn) = &self.shared_conn {
            return Ok(conn.clone());
        }
        Ok(self.db.connect()?)
    }

    async fn configure_database(&self) -> Result<()> {
        let conn = self.connect()?;

        let busy_timeout_sql = format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms);
        if let Err(error) = conn.execute_batch(&busy_timeout_sql).await {
            tracing::warn!(
                busy_timeout_ms = self.busy_timeout_ms,
                error = %error,
                "Failed to set SQLite busy_timeout"
            );
        }

        // WAL is meaningless for an in-memory database.
        if self.shared_conn.is_none() {
            let journal_sql = format!("PRAGMA journal_mode = {}", self.journal_mode);
            if let Err(error) = conn.execute_batch(&journal_sql).await {
                tracing::warn!(
                    mode = %self.journal_mode,
                    error = %error,
                    "Failed to set SQLite journal_mode"
                );
            }
        }

        let synchronous_sql = format!("PRAGMA synchronous = {}", self.synchronous);
        if let Err(error) = conn.execute_batch(&synchronous_sql).await {
            tracing::warn!(
                mode = %self.synchronous,
                error = %error,
                "Failed to set SQLite synchronous pragma"
            );
        }

        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::init_schema(&conn).await?;
        Ok(())
    }

    /// Pull from the remote primary. No-op unless this is an embedded replica.
    pub async fn sync(&self) -> Result<()> {
        if !self.replica {
            return Ok(());
        }
        let sync = self.db.sync().await?;
        tracing::debug!("Database synced: {:?}", sync);
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            shared_conn: self.shared_conn.clone(),
            replica: self.replica,
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode.clone(),
            synchronous: self.synchronous.clone(),
        }
    }
}

fn is_in_memory_url(url: &str) -> bool {
    matches!(url, ":memory:" | "file::memory:")
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "WAL" => "WAL",
        "OFF" => "OFF",
        _ => "WAL",
    }
}

fn normalize_synchronous(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "OFF" => "OFF",
        "NORMAL" => "NORMAL",
        "FULL" => "FULL",
        "EXTRA" => "EXTRA",
        _ => "NORMAL",
    }
}
