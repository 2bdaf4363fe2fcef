pub mod api;
pub mod decompose;
pub mod prompts;
pub mod provider;

pub use decompose::{decompose, FALLBACK_QUESTIONS};
pub use provider::{SearchBackend, SearchProvider};
