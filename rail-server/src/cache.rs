//! Caching layer for route search results.
//!
//! A search is a pure function of (start, end, catalog snapshot), so
//! results are cached under the snapshot's generation. A refresh bumps the
//! generation, and old entries simply stop being asked for; the refresh
//! loop also invalidates them so they do not hold memory until they expire.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StationCode;
use crate::planner::Itinerary;

/// Cache key for searches: (start, end, catalog generation).
pub type RouteKey = (StationCode, StationCode, u64);

/// Cached search result.
pub type RouteEntry = Arc<Vec<Itinerary>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache for route search results.
#[derive(Clone)]
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    pub async fn get(&self, key: &RouteKey) -> Option<RouteEntry> {
        self.routes.get(key).await
    }

    pub async fn insert(&self, key: RouteKey, entry: RouteEntry) {
        self.routes.insert(key, entry).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
