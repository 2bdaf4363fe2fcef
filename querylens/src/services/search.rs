use crate::error::{QueryLensError, Result};
use crate::models::SearchResponse;
use crate::search::{decompose, SearchProvider};
use crate::services::HistoryService;

/// Search flow: gateway call, decomposition, then an unawaited history write.
#[derive(Clone)]
pub struct SearchService {
    provider: SearchProvider,
    history: HistoryService,
    record_history: bool,
}

impl SearchService {
    pub fn new(provider: SearchProvider, history: HistoryService, record_history: bool) -> Self {
        Self {
            provider,
            history,
            record_history,
        }
    }

    pub fn provider(&self) -> &SearchProvider {
        &self.provider
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(QueryLensError::Validation("Query is required".to_string()));
        }

        let raw = self.provider.search(query).await.map_err(|error| {
            tracing::error!(error = %error, query_len = query.len(), "Search failed");
            error
        })?;

        let response = decompose(&raw.text, &raw.sources);
        tracing::info!(
            query_len = query.len(),
            sources = response.sources.len(),
            related_questions = response.related_questions.len(),
            "Search completed"
        );

        if self.record_history {
            self.record_history(query);
        }

        Ok(response)
    }

    /// Append `query` to history in the background. Failures are logged
    /// and never reach the caller.
    pub fn record_history(&self, query: &str) -> tokio::task::JoinHandle<()> {
        let history = self.history.clone();
        let query = query.to_string();

        tokio::spawn(async move {
            if let Err(error) = history.append(&query).await {
                tracing::error!(error = %error, "Failed to record search history");
            }
        })
    }
}
