use crate::config::SearchConfig;
use crate::error::{QueryLensError, Result};
use crate::models::RawSearchResult;
use crate::search::api::GeminiApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBackend {
    Gemini { model: String },
    Unavailable { reason: String },
}

/// Search gateway. Stays constructible without credentials so the rest of
/// the service keeps working; searches then fail as unavailable.
#[derive(Debug, Clone)]
pub struct SearchProvider {
    backend: SearchBackend,
    client: Option<GeminiApiClient>,
}

impl SearchProvider {
    pub fn new(config: &SearchConfig) -> Self {
        match GeminiApiClient::new(config) {
            Ok(client) => Self {
                backend: SearchBackend::Gemini {
                    model: config.model.clone(),
                },
                client: Some(client),
            },
            Err(QueryLensError::UpstreamUnavailable(reason)) => Self::unavailable(&reason),
            Err(error) => Self::unavailable(&error.to_string()),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: SearchBackend::Unavailable {
                reason: reason.to_string(),
            },
            client: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, SearchBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &SearchBackend {
        &self.backend
    }

    /// One grounded generation for `query`: combined answer text plus the
    /// raw grounding citations.
    pub async fn search(&self, query: &str) -> Result<RawSearchResult> {
        match (&self.backend, &self.client) {
            (SearchBackend::Gemini { .. }, Some(client)) => client.search(query).await,
            (SearchBackend::Unavailable { reason }, _) => {
                Err(QueryLensError::UpstreamUnavailable(reason.clone()))
            }
            (_, None) => Err(QueryLensError::UpstreamUnavailable(
                "No search client configured".to_string(),
            )),
        }
    }
}
