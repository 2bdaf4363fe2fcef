use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Non-empty env var, treating `FOO=` the same as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

/// Default generative model used for grounded answers.
pub const DEFAULT_SEARCH_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL of the Generative Language REST API.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Number of history entries shown by default.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with a pre-built front-end. Served with SPA fallback when set.
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

impl DatabaseConfig {
    /// Remote libsql server (Turso or sqld).
    pub fn is_remote(&self) -> bool {
        self.url.starts_with("libsql://") || self.url.starts_with("https://")
    }

    /// Local file kept in sync with a remote primary.
    pub fn is_embedded_replica(&self) -> bool {
        self.is_remote() && self.local_path.is_some()
    }
}

/// Generative-search provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Request timeout. `None` leaves the call unbounded.
    pub timeout_secs: Option<u64>,
    /// Append the query to history after a successful `/api/search`.
    pub record_history: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub display_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_SEARCH_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            timeout_secs: None,
            record_history: true,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("QUERYLENS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("QUERYLENS_PORT", 3000),
                static_dir: env_non_empty("STATIC_DIR"),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "file:search_history.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            search: SearchConfig {
                model: env_non_empty("SEARCH_MODEL")
                    .unwrap_or_else(|| DEFAULT_SEARCH_MODEL.to_string()),
                api_key: env_non_empty("GEMINI_API_KEY"),
                base_url: env_non_empty("SEARCH_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.to_string()),
                timeout_secs: parse_env_opt("SEARCH_TIMEOUT"),
                record_history: parse_env_or("SEARCH_RECORD_HISTORY", true),
            },
            history: HistoryConfig {
                display_limit: parse_env_or("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT).max(1),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Human-readable summary with secrets redacted.
    pub fn redacted_summary(&self) -> String {
        let api_key = match &self.search.api_key {
            Some(_) => "set",
            None => "missing",
        };
        let timeout = self
            .search
            .timeout_secs
            .map(|secs| format!("{secs}s"))
            .unwrap_or_else(|| "none".to_string());

        format!(
            "server: {}:{} (static: {})\n\
             database: {}\n\
             search: model={} base_url={} api_key={} timeout={} record_history={}\n\
             history: display_limit={}",
            self.server.host,
            self.server.port,
            self.server.static_dir.as_deref().unwrap_or("-"),
            self.database.url,
            self.search.model,
            self.search.base_url,
            api_key,
            timeout,
            self.search.record_history,
            self.history.display_limit,
        )
    }
}
