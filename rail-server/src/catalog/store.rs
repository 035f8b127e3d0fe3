//! Refreshable catalog handle shared by all requests.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::error::CatalogError;
use super::snapshot::Catalog;
use super::source::CatalogSource;

/// A catalog together with the generation it was loaded as.
///
/// The generation starts at 1 and increases by one on every successful
/// refresh, so results derived from a snapshot can be keyed by it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub catalog: Arc<Catalog>,
    pub generation: u64,
}

/// Thread-safe catalog with support for background refresh.
///
/// Requests take a [`Snapshot`] and route against it; a refresh that lands
/// mid-request swaps the shared pointer but never touches the catalog the
/// request is holding.
pub struct CatalogStore<S> {
    current: Arc<RwLock<Snapshot>>,
    source: Arc<S>,
}

impl<S> Clone for CatalogStore<S> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: CatalogSource> CatalogStore<S> {
    /// Load the initial catalog from `source`.
    ///
    /// This will fail if the source cannot be read.
    pub async fn load(source: S) -> Result<Self, CatalogError> {
        let catalog = source.load().await?;
        info!(source = %source.describe(), lines = catalog.lines().len(), "catalog loaded");

        Ok(Self {
            current: Arc::new(RwLock::new(Snapshot {
                catalog: Arc::new(catalog),
                generation: 1,
            })),
            source: Arc::new(source),
        })
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.current.read().await.clone()
    }

    /// Reload from the source.
    ///
    /// On success, replaces the current snapshot and returns the new
    /// generation. On failure, the existing snapshot is preserved and the
    /// error is returned.
    pub async fn refresh(&self) -> Result<u64, CatalogError> {
        let catalog = self.source.load().await?;

        let mut guard = self.current.write().await;
        let generation = guard.generation + 1;
        *guard = Snapshot {
            catalog: Arc::new(catalog),
            generation,
        };

        Ok(generation)
    }
}
