use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::search::SearchProvider;
use crate::services::{HistoryService, SearchService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub history: HistoryService,
    pub search: SearchService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, provider: SearchProvider) -> Self {
        let config = Arc::new(config);
        let history = HistoryService::new(db.clone(), config.history.display_limit);
        let search = SearchService::new(provider, history.clone(), config.search.record_history);

        Self {
            config,
            db,
            history,
            search,
        }
    }
}
