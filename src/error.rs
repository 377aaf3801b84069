//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`CatalogError`](crate::catalog::CatalogError),
//! [`FetchError`](crate::fetch::FetchError)), while the CLI uses `anyhow`
//! for convenient propagation up to `main`.
//!
//! # Design
//!
//! - [`Error`]: fatal, run-aborting errors (startup, input loading)
//! - Per-item failures never surface here; they are folded into the
//!   pipeline's outcome counters instead.
//!
//! # Example
//!
//! ```ignore
//! use listen_fetch::error::{Error, Result};
//!
//! fn load(path: &Path) -> Result<Vec<AggregatedTrack>> {
//!     let text = std::fs::read_to_string(path)?; // IO errors auto-convert
//!     Ok(serde_json::from_str(&text)?)           // JSON errors auto-convert
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required external tool is not installed
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    /// Input path is neither a directory nor a JSON file
    #[error("Invalid input path: {0}")]
    InvalidInputPath(PathBuf),

    /// Directory contains no `Streaming_History_Audio_*.json` files
    #[error("No history files found in {0}")]
    NoHistoryFilesFound(PathBuf),

    /// Pre-processed history file is not a JSON array
    #[error("Invalid history file format: {0} (expected a JSON array)")]
    InvalidHistoryFileFormat(PathBuf),

    /// A single history export could not be parsed
    #[error("Failed to parse {path}: {source}")]
    HistoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog search error
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Download error
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input path error.
    pub fn invalid_input(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputPath(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
