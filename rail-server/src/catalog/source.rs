//! Catalog sources.
//!
//! A source produces a fresh [`Catalog`] on demand. The server loads one at
//! startup and again on every refresh; the route search itself never talks
//! to a source.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::convert::{convert_all, convert_district, convert_line, convert_schedule, convert_train};
use super::error::CatalogError;
use super::records::{DistrictRecord, LineRecord, ScheduleRecord, TrainRecord};
use super::snapshot::{Catalog, derive_districts};

pub const LINES_FILE: &str = "lines.json";
pub const SCHEDULES_FILE: &str = "schedules.json";
pub const TRAINS_FILE: &str = "trains.json";
pub const DISTRICTS_FILE: &str = "districts.json";

/// Default timeout for catalog HTTP requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Something that can produce a catalog snapshot.
pub trait CatalogSource: Send + Sync {
    /// Load a complete snapshot.
    fn load(&self) -> impl Future<Output = Result<Catalog, CatalogError>> + Send;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Convert raw documents into a snapshot.
///
/// When no district directory is supplied, one is derived from the stations
/// the lines call at.
pub fn assemble(
    lines: &[LineRecord],
    schedules: &[ScheduleRecord],
    trains: &[TrainRecord],
    districts: Option<&[DistrictRecord]>,
) -> Catalog {
    let lines = convert_all(lines, "line", convert_line);
    let schedules = convert_all(schedules, "schedule", convert_schedule);
    let trains = convert_all(trains, "train", convert_train);
    let districts = match districts {
        Some(records) => convert_all(records, "district", convert_district),
        None => derive_districts(&lines),
    };

    info!(
        lines = lines.len(),
        schedules = schedules.len(),
        trains = trains.len(),
        districts = districts.len(),
        "catalog assembled"
    );

    Catalog::new(lines, schedules, trains, districts)
}

/// Loads catalog documents from JSON files in a directory.
///
/// `lines.json`, `schedules.json` and `trains.json` are required;
/// `districts.json` is optional.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let lines: Vec<LineRecord> = read_json(&self.dir.join(LINES_FILE)).await?;
        let schedules: Vec<ScheduleRecord> = read_json(&self.dir.join(SCHEDULES_FILE)).await?;
        let trains: Vec<TrainRecord> = read_json(&self.dir.join(TRAINS_FILE)).await?;
        let districts: Option<Vec<DistrictRecord>> =
            read_optional_json(&self.dir.join(DISTRICTS_FILE)).await?;

        Ok(assemble(&lines, &schedules, &trains, districts.as_deref()))
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    read_optional_json(path).await?.ok_or_else(|| CatalogError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    })
}

async fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CatalogError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "optional catalog file not present");
            return Ok(None);
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| CatalogError::Json {
            origin: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Configuration for the HTTP catalog source.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// URL the catalog documents live under, e.g. `http://data.local/catalog`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Fetches the catalog documents over HTTP.
///
/// The four documents are requested concurrently. A 404 for the district
/// directory is not an error; a directory is derived instead.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of one catalog document.
    pub fn url(&self, document: &str) -> String {
        format!("{}/{}", self.base_url, document)
    }

    /// Fetch one document; `Ok(None)` on 404.
    async fn fetch<T: DeserializeOwned>(&self, document: &str) -> Result<Option<T>, CatalogError> {
        let url = self.url(document);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| CatalogError::Json {
                origin: url,
                message: e.to_string(),
            })
    }

    async fn fetch_required<T: DeserializeOwned>(&self, document: &str) -> Result<T, CatalogError> {
        self.fetch(document).await?.ok_or_else(|| CatalogError::Api {
            status: 404,
            url: self.url(document),
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let (lines, schedules, trains, districts) = futures::try_join!(
            self.fetch_required::<Vec<LineRecord>>(LINES_FILE),
            self.fetch_required::<Vec<ScheduleRecord>>(SCHEDULES_FILE),
            self.fetch_required::<Vec<TrainRecord>>(TRAINS_FILE),
            self.fetch::<Vec<DistrictRecord>>(DISTRICTS_FILE),
        )?;

        Ok(assemble(&lines, &schedules, &trains, districts.as_deref()))
    }

    fn describe(&self) -> String {
        format!("catalog server {}", self.base_url)
    }
}

/// Any of the supported sources, chosen at startup from configuration.
#[derive(Debug, Clone)]
pub enum AnySource {
    File(FileCatalogSource),
    Http(HttpCatalogSource),
    /// A snapshot held in memory; every load returns a copy of it.
    Fixed(Catalog),
}

impl CatalogSource for AnySource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        match self {
            AnySource::File(source) => source.load().await,
            AnySource::Http(source) => source.load().await,
            AnySource::Fixed(catalog) => Ok(catalog.clone()),
        }
    }

    fn describe(&self) -> String {
        match self {
            AnySource::File(source) => source.describe(),
            AnySource::Http(source) => source.describe(),
            AnySource::Fixed(_) => "in-memory catalog".to_string(),
        }
    }
}
