mod history;
mod search;

pub use history::*;
pub use search::*;
