//! Catalog loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading a catalog snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading or writing a catalog file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog document is not valid JSON for its record type
    #[error("JSON parse error in {origin}: {message}")]
    Json { origin: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog server returned an error status
    #[error("catalog server returned {status} for {url}")]
    Api { status: u16, url: String },
}
