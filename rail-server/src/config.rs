//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::planner::{RouteConfig, VisitPolicy};

pub const BIND_ADDR_VAR: &str = "RAIL_BIND_ADDR";
pub const DATA_DIR_VAR: &str = "RAIL_DATA_DIR";
pub const DATA_URL_VAR: &str = "RAIL_DATA_URL";
pub const DATA_TIMEOUT_SECS_VAR: &str = "RAIL_DATA_TIMEOUT_SECS";
pub const REFRESH_SECS_VAR: &str = "RAIL_REFRESH_SECS";
pub const CACHE_TTL_SECS_VAR: &str = "RAIL_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_VAR: &str = "RAIL_CACHE_CAPACITY";
pub const MAX_CHAINS_VAR: &str = "RAIL_MAX_CHAINS";
pub const VISIT_POLICY_VAR: &str = "RAIL_VISIT_POLICY";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Dir(PathBuf),
    Url(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data: DataLocation,
    /// Request timeout for a URL data location. `None` keeps the client default.
    pub data_timeout_secs: Option<u64>,
    /// How often to reload the catalog. `None` disables refresh.
    pub refresh_interval: Option<Duration>,
    pub cache: CacheConfig,
    pub route: RouteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data: DataLocation::Dir(PathBuf::from("./data")),
            data_timeout_secs: None,
            refresh_interval: Some(Duration::from_secs(3600)),
            cache: CacheConfig::default(),
            route: RouteConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set. Unset and empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get(BIND_ADDR_VAR) {
            config.bind_addr = parse(BIND_ADDR_VAR, &addr)?;
        }

        if let Some(url) = get(DATA_URL_VAR) {
            config.data = DataLocation::Url(url);
        } else if let Some(dir) = get(DATA_DIR_VAR) {
            config.data = DataLocation::Dir(PathBuf::from(dir));
        }

        if let Some(secs) = get(DATA_TIMEOUT_SECS_VAR) {
            config.data_timeout_secs = Some(parse(DATA_TIMEOUT_SECS_VAR, &secs)?);
        }

        if let Some(secs) = get(REFRESH_SECS_VAR) {
            let secs: u64 = parse(REFRESH_SECS_VAR, &secs)?;
            config.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(secs) = get(CACHE_TTL_SECS_VAR) {
            config.cache.ttl = Duration::from_secs(parse(CACHE_TTL_SECS_VAR, &secs)?);
        }

        if let Some(capacity) = get(CACHE_CAPACITY_VAR) {
            config.cache.max_capacity = parse(CACHE_CAPACITY_VAR, &capacity)?;
        }

        if let Some(max) = get(MAX_CHAINS_VAR) {
            let max: usize = parse(MAX_CHAINS_VAR, &max)?;
            if max == 0 {
                return Err(ConfigError {
                    var: MAX_CHAINS_VAR,
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            config.route.max_chains_per_path = max;
        }

        if let Some(policy) = get(VISIT_POLICY_VAR) {
            config.route.visit_policy = parse::<VisitPolicy>(VISIT_POLICY_VAR, &policy)?;
        }

        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
