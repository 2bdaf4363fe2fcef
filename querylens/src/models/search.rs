use serde::{Deserialize, Serialize};

/// A cited web page shown next to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// Decomposed answer returned to the caller of a search.
///
/// Wire format:
/// ```json
/// {
///   "answer": "Paris is the capital of France [1].",
///   "sources": [{ "title": "Wiki", "url": "https://en.wikipedia.org/Paris" }],
///   "relatedQuestions": ["What is the population of Paris?"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub answer: String,
    pub sources: Vec<Source>,
    /// Between one and three follow-up questions.
    pub related_questions: Vec<String>,
}

/// Web reference carried by a grounding citation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Grounding citation as returned by the provider. Only entries with a
/// `web` payload are turned into [`Source`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub web: Option<WebReference>,
}

impl RawSource {
    pub fn web(title: Option<&str>, uri: &str) -> Self {
        Self {
            web: Some(WebReference {
                uri: uri.to_string(),
                title: title.map(str::to_string),
            }),
        }
    }
}

/// Undecomposed provider output: the combined answer text plus citations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSearchResult {
    pub text: String,
    pub sources: Vec<RawSource>,
}
