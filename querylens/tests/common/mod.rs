#![allow(dead_code)]

use std::sync::{Arc, Once};

use async_trait::async_trait;
use serde_json::{json, Value};

use querylens::api::AppState;
use querylens::config::{Config, DatabaseConfig, HistoryConfig, SearchConfig, ServerConfig};
use querylens::db::{Database, DatabaseBackend, HistoryStore, LibSqlBackend};
use querylens::error::{QueryLensError, Result};
use querylens::models::HistoryEntry;
use querylens::search::SearchProvider;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const PARIS_ANSWER: &str = "Paris is the capital of France [1].\n\nRelated Questions:\n1. What is the population of Paris?\n2. What river runs through Paris?\n3. When was Paris founded?";

/// Search config pointing at a fake provider.
pub fn search_config(base_url: &str) -> SearchConfig {
    SearchConfig {
        api_key: Some("test-key".to_string()),
        base_url: format!("{base_url}/v1beta"),
        timeout_secs: Some(5),
        ..SearchConfig::default()
    }
}

pub fn generate_content_path() -> String {
    format!(
        "/v1beta/models/{}:generateContent",
        querylens::config::DEFAULT_SEARCH_MODEL
    )
}

/// Minimal `generateContent` response with one candidate.
pub fn gemini_body(text: &str, chunks: Value) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "groundingMetadata": {"groundingChunks": chunks}
        }],
        "modelVersion": querylens::config::DEFAULT_SEARCH_MODEL
    })
}

pub fn database_config(url: String) -> DatabaseConfig {
    DatabaseConfig {
        url,
        auth_token: None,
        local_path: None,
    }
}

pub fn test_config(search: SearchConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: None,
        },
        database: database_config(":memory:".to_string()),
        search,
        history: HistoryConfig::default(),
    }
}

/// Backend whose every storage call fails, as if the database were gone.
pub struct FailingBackend;

fn storage_unavailable() -> QueryLensError {
    QueryLensError::Persistence(libsql::Error::ConnectionFailed(
        "database is unavailable".to_string(),
    ))
}

#[async_trait]
impl HistoryStore for FailingBackend {
    async fn append_history(&self, _query: &str) -> Result<HistoryEntry> {
        Err(storage_unavailable())
    }
    async fn recent_history(&self, _limit: u32) -> Result<Vec<HistoryEntry>> {
        Err(storage_unavailable())
    }
    async fn count_history(&self) -> Result<u64> {
        Err(storage_unavailable())
    }
}

#[async_trait]
impl DatabaseBackend for FailingBackend {
    async fn sync(&self) -> Result<()> {
        Err(storage_unavailable())
    }
}

pub fn failing_state(search: SearchConfig) -> AppState {
    let config = test_config(search);
    let provider = SearchProvider::new(&config.search);
    AppState::new(config, Arc::new(FailingBackend), provider)
}

pub async fn test_state(search: SearchConfig) -> AppState {
    let config = test_config(search);
    let db = Database::new(&config.database)
        .await
        .expect("Failed to create database");
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(db));
    let provider = SearchProvider::new(&config.search);
    AppState::new(config, db, provider)
}
