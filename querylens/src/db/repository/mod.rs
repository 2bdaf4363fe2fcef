mod history;

pub use history::HistoryRepository;
