use std::time::Duration;

use reqwest::{header::RETRY_AFTER, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    config::SearchConfig,
    error::{QueryLensError, Result},
    models::{RawSearchResult, RawSource},
    search::prompts::SYSTEM_INSTRUCTION,
};

/// Text returned when the model produced no text parts at all.
pub const EMPTY_RESPONSE_TEXT: &str = "No response generated.";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest upstream error body kept in an error message.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<RawSource>,
}

impl GenerateContentResponse {
    fn into_raw_result(self) -> RawSearchResult {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return RawSearchResult {
                text: EMPTY_RESPONSE_TEXT.to_string(),
                sources: Vec::new(),
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| part.thought != Some(true))
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|metadata| metadata.grounding_chunks)
            .unwrap_or_default();

        RawSearchResult {
            text: if text.is_empty() {
                EMPTY_RESPONSE_TEXT.to_string()
            } else {
                text
            },
            sources,
        }
    }
}

/// Thin client for the Gemini `generateContent` endpoint with the Google
/// Search grounding tool enabled. Issues exactly one request per call.
#[derive(Clone)]
pub struct GeminiApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiApiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                QueryLensError::UpstreamUnavailable("GEMINI_API_KEY is not set".to_string())
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|error| {
            QueryLensError::Internal(format!("Failed to create search HTTP client: {error}"))
        })?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http,
            endpoint,
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn search(&self, query: &str) -> Result<RawSearchResult> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![RequestPart { text: query }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![RequestPart {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        tracing::debug!(model = %self.model, query_len = query.len(), "Sending grounded search request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, retry_after, &body));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|error| {
            QueryLensError::Upstream(format!("Undecodable search response: {error}"))
        })?;

        let result = body.into_raw_result();
        tracing::debug!(
            text_len = result.text.len(),
            sources = result.sources.len(),
            "Grounded search response received"
        );

        Ok(result)
    }

    fn map_transport_error(error: reqwest::Error) -> QueryLensError {
        if error.is_timeout() {
            QueryLensError::Upstream(format!("Search request timed out: {error}"))
        } else {
            QueryLensError::Upstream(format!("Search request failed: {error}"))
        }
    }

    fn map_status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> QueryLensError {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => QueryLensError::UpstreamAuth(
                format!("Search provider rejected credentials ({status}): {preview}"),
            ),
            StatusCode::TOO_MANY_REQUESTS => QueryLensError::UpstreamRateLimit { retry_after },
            _ => QueryLensError::Upstream(format!(
                "Search provider returned {status}: {preview}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn test_search_config() -> SearchConfig {
        SearchConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost:9/v1beta/".to_string(),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = SearchConfig {
            api_key: None,
            ..test_search_config()
        };
        assert!(matches!(
            GeminiApiClient::new(&config),
            Err(QueryLensError::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn test_endpoint_uses_model_and_trims_base_url() {
        let client = GeminiApiClient::new(&test_search_config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![RequestPart { text: "what is rust" }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![RequestPart { text: "be brief" }],
            },
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{"role": "user", "parts": [{"text": "what is rust"}]}],
                "systemInstruction": {"parts": [{"text": "be brief"}]},
                "tools": [{"googleSearch": {}}]
            })
        );
    }

    #[test]
    fn test_response_concatenates_text_parts_and_reads_grounding() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Paris is "},
                    {"text": "the capital."}
                ]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"retrievedContext": {"uri": "gs://bucket"}}
                ]}
            }]
        }))
        .unwrap();

        let raw = response.into_raw_result();
        assert_eq!(raw.text, "Paris is the capital.");
        assert_eq!(
            raw.sources,
            vec![
                RawSource::web(Some("A"), "https://a.example"),
                RawSource { web: None },
            ]
        );
    }

    #[test]
    fn test_response_without_text_uses_placeholder() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        let raw = response.into_raw_result();
        assert_eq!(raw.text, EMPTY_RESPONSE_TEXT);
        assert!(raw.sources.is_empty());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(response.into_raw_result().text, EMPTY_RESPONSE_TEXT);
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            GeminiApiClient::map_status_error(StatusCode::UNAUTHORIZED, None, "bad key"),
            QueryLensError::UpstreamAuth(_)
        ));
        assert!(matches!(
            GeminiApiClient::map_status_error(StatusCode::FORBIDDEN, None, ""),
            QueryLensError::UpstreamAuth(_)
        ));
        assert!(matches!(
            GeminiApiClient::map_status_error(StatusCode::TOO_MANY_REQUESTS, Some(30), ""),
            QueryLensError::UpstreamRateLimit {
                retry_after: Some(30)
            }
        ));
        assert!(matches!(
            GeminiApiClient::map_status_error(StatusCode::INTERNAL_SERVER_ERROR, None, "boom"),
            QueryLensError::Upstream(_)
        ));
    }
}
