//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::RouteCache;
use crate::catalog::{AnySource, CatalogStore};
use crate::planner::RouteConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current network catalog
    pub catalog: CatalogStore<AnySource>,

    /// Cached route search results
    pub routes: RouteCache,

    /// Route search configuration
    pub config: Arc<RouteConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CatalogStore<AnySource>, routes: RouteCache, config: RouteConfig) -> Self {
        Self {
            catalog,
            routes,
            config: Arc::new(config),
        }
    }
}
