use std::sync::Arc;

use corkboard_persist::BoardStore;
use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The store is created once at startup and shared by every request; dropping
/// the last `Arc` at shutdown closes its connections.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn BoardStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn BoardStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
