//! Fixed instructions sent with every grounded search.

/// Literal heading the model is told to put before its follow-up questions.
/// The answer decomposer splits on this text, case-insensitively.
pub const RELATED_QUESTIONS_MARKER: &str = "Related Questions:";

/// System instruction for the generative-search model.
///
/// Asks for a concise cited markdown answer that ends with a
/// [`RELATED_QUESTIONS_MARKER`] section holding three numbered questions.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an AI search assistant that answers questions using live web search results.
Provide a concise, accurate answer based on the search results.
Always cite your sources using [1], [2], etc.
At the very end of your response, you MUST include a section starting with the exact text "Related Questions:" followed by 3 numbered follow-up questions.
Format the response clearly with markdown."#;
