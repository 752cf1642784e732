use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the meta server core.
/// Every module returns `Result<T, MetaError>`.
#[derive(Debug, Error)]
pub enum MetaError {
    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed for {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    // ── Parsing ─────────────────────────────────────────
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    // ── Aggregation ─────────────────────────────────────
    #[error("Inconsistent upstream data: {0}")]
    InconsistentData(String),

    // ── Lookup ──────────────────────────────────────────
    #[error("Unknown game version: {0}")]
    UnknownGameVersion(String),

    #[error("Unknown loader version: {0}")]
    UnknownLoaderVersion(String),

    #[error("Malformed upstream metadata: {0}")]
    MalformedUpstreamMeta(String),

    // ── Packaging ───────────────────────────────────────
    #[error("Zip packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type MetaResult<T> = Result<T, MetaError>;

impl From<std::io::Error> for MetaError {
    fn from(source: std::io::Error) -> Self {
        MetaError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl MetaError {
    /// True when the error means a requested entity does not exist, as
    /// opposed to an upstream or internal failure. The endpoint layer maps
    /// these to a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MetaError::UnknownGameVersion(_) | MetaError::UnknownLoaderVersion(_)
        )
    }
}
