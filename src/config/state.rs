// Application state module
// Holds the loaded configuration and the immutable route table

use std::sync::Arc;

use super::types::Config;
use crate::routing::RouteTable;

/// Application state shared across connections
///
/// The route table is resolved once at startup and never mutated, so
/// request handlers read it without any synchronization.
pub struct AppState {
    pub config: Config,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(config: Config, routes: RouteTable) -> Self {
        Self {
            config,
            routes: Arc::new(routes),
        }
    }
}
