pub(crate) mod health;
pub mod history;
pub mod search;

pub use health::health_check;
