mod history;
mod search;

pub use history::HistoryService;
pub use search::SearchService;
