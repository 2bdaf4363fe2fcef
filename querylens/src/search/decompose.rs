//! Splits a grounded answer into body, citations and follow-up questions.
//!
//! The model is instructed to end its answer with a `Related Questions:`
//! section. Everything from the last occurrence of that heading onward is
//! treated as the question block, regardless of case.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{RawSource, SearchResponse, Source};

/// Used verbatim whenever no follow-up question survives extraction.
pub const FALLBACK_QUESTIONS: [&str; 3] = [
    "Tell me more about this.",
    "What are the implications?",
    "Can you summarize the key points?",
];

const MARKER: &str = "related questions:";
const MAX_RELATED_QUESTIONS: usize = 3;
/// Lines this short or shorter are list debris, not questions.
const MIN_QUESTION_CHARS: usize = 5;
const DEFAULT_SOURCE_TITLE: &str = "Source";

fn list_prefixes() -> &'static [Regex; 3] {
    static PREFIXES: OnceLock<[Regex; 3]> = OnceLock::new();
    PREFIXES.get_or_init(|| {
        [
            Regex::new(r"^[0-9]+\.\s*").expect("valid numbered-list regex"),
            Regex::new(r"^- \s*").expect("valid dash-list regex"),
            Regex::new(r"^\*\s*").expect("valid star-list regex"),
        ]
    })
}

/// Decompose raw provider output into a [`SearchResponse`]. Never fails.
pub fn decompose(raw_text: &str, raw_sources: &[RawSource]) -> SearchResponse {
    let sources = normalize_sources(raw_sources);

    let (answer, related_questions) = match find_marker(raw_text) {
        Some(index) => (
            raw_text[..index].trim().to_string(),
            extract_questions(&raw_text[index + MARKER.len()..]),
        ),
        None => (raw_text.trim().to_string(), Vec::new()),
    };

    let related_questions = if related_questions.is_empty() {
        FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
    } else {
        related_questions
    };

    SearchResponse {
        answer,
        sources,
        related_questions,
    }
}

/// Byte offset of the last case-insensitive marker occurrence. ASCII
/// lowercasing keeps offsets aligned with `text`.
fn find_marker(text: &str) -> Option<usize> {
    text.to_ascii_lowercase().rfind(MARKER)
}

fn extract_questions(block: &str) -> Vec<String> {
    block
        .split('\n')
        .map(strip_list_prefix)
        .filter(|line| line.chars().count() > MIN_QUESTION_CHARS)
        .take(MAX_RELATED_QUESTIONS)
        .collect()
}

fn strip_list_prefix(line: &str) -> String {
    let mut current = line.to_string();
    for prefix in list_prefixes() {
        current = prefix.replace(&current, "").into_owned();
    }
    current.trim().to_string()
}

fn normalize_sources(raw_sources: &[RawSource]) -> Vec<Source> {
    raw_sources
        .iter()
        .filter_map(|raw| raw.web.as_ref())
        .map(|web| Source {
            title: web
                .title
                .as_deref()
                .filter(|title| !title.is_empty())
                .unwrap_or(DEFAULT_SOURCE_TITLE)
                .to_string(),
            url: web.uri.clone(),
        })
        .collect()
}
