//! Audio download - the "fetch by catalog id into a file" capability.
//!
//! The pipeline only sees [`AudioFetcher`]; [`ytdlp::YtDlpFetcher`] is the
//! production implementation and tests use the mocks below.

pub mod naming;
pub mod ytdlp;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use ytdlp::YtDlpFetcher;

/// Per-download settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Target audio format; also the expected output extension
    pub audio_format: String,
    /// Netscape-format cookie file handed to the downloader
    pub cookie_file: Option<PathBuf>,
}

/// Errors that can occur while downloading
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("yt-dlp not found. Install it from https://github.com/yt-dlp/yt-dlp")]
    ToolNotFound,

    #[error("Failed to run downloader: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Downloader exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("Downloader reported success but {0} is missing")]
    OutputMissing(PathBuf),
}

/// Download a catalog item into `destination`.
///
/// `destination` is the full expected output path, extension included.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(
        &self,
        catalog_id: &str,
        destination: &Path,
        options: &FetchOptions,
    ) -> Result<(), FetchError>;
}
