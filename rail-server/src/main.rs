use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rail_server::cache::RouteCache;
use rail_server::catalog::{
    AnySource, CatalogSource, CatalogStore, FileCatalogSource, HttpCatalogConfig,
    HttpCatalogSource,
};
use rail_server::config::{AppConfig, DataLocation};
use rail_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "rail_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let source = match &config.data {
        DataLocation::Dir(dir) => AnySource::File(FileCatalogSource::new(dir)),
        DataLocation::Url(url) => {
            let mut http = HttpCatalogConfig::new(url);
            if let Some(secs) = config.data_timeout_secs {
                http = http.with_timeout(secs);
            }
            AnySource::Http(HttpCatalogSource::new(http)?)
        }
    };

    // Fail fast if the catalog cannot be loaded
    info!(source = %source.describe(), "loading catalog");
    let store = CatalogStore::load(source).await?;
    let routes = RouteCache::new(&config.cache);

    if let Some(period) = config.refresh_interval {
        let store = store.clone();
        let routes = routes.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match store.refresh().await {
                    Ok(generation) => {
                        routes.invalidate_all();
                        info!(generation, "refreshed catalog");
                    }
                    Err(e) => warn!(error = %e, "failed to refresh catalog, keeping current"),
                }
            }
        });
    }

    let state = AppState::new(store, routes, config.route.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        visit_policy = %config.route.visit_policy,
        "rail route server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
