//! Audio download via yt-dlp
//!
//! Shells out to `yt-dlp` to download and transcode a YouTube Music track.
//! yt-dlp (plus ffmpeg for transcoding) must be installed separately:
//! - Windows: `winget install yt-dlp.yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `pipx install yt-dlp` or the distribution package

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{AudioFetcher, FetchError, FetchOptions};

const WATCH_URL: &str = "https://music.youtube.com/watch?v=";

/// Common installation paths for yt-dlp on Windows
#[cfg(windows)]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    r"C:\Program Files\yt-dlp\yt-dlp.exe",
    r"C:\ProgramData\chocolatey\bin\yt-dlp.exe",
];

#[cfg(not(windows))]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    "/usr/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/opt/homebrew/bin/yt-dlp",
];

/// Find the yt-dlp executable, checking common installation paths
fn find_ytdlp() -> Option<&'static str> {
    YTDLP_PATHS
        .iter()
        .find(|&path| {
            std::process::Command::new(path)
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .copied()
}

/// Get yt-dlp version string (for diagnostics)
pub fn get_ytdlp_version() -> Option<String> {
    let ytdlp = find_ytdlp()?;
    std::process::Command::new(ytdlp)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

/// [`AudioFetcher`] backed by the yt-dlp executable
pub struct YtDlpFetcher {
    binary: &'static str,
}

impl YtDlpFetcher {
    /// Locate yt-dlp, failing if it isn't installed
    pub fn locate() -> Result<Self, FetchError> {
        find_ytdlp()
            .map(|binary| Self { binary })
            .ok_or(FetchError::ToolNotFound)
    }
}

#[async_trait]
impl AudioFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        catalog_id: &str,
        destination: &Path,
        options: &FetchOptions,
    ) -> Result<(), FetchError> {
        let args = build_args(catalog_id, destination, options);
        debug!("{} {}", self.binary, args.join(" "));

        let output = Command::new(self.binary).args(&args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::ProcessFailed {
                status: output.status.to_string(),
                stderr: last_error_line(&stderr),
            });
        }

        Ok(())
    }
}

/// Command-line arguments for one download
fn build_args(catalog_id: &str, destination: &Path, options: &FetchOptions) -> Vec<String> {
    let mut args = vec![
        "--extract-audio".to_string(),
        "--audio-format".to_string(),
        options.audio_format.clone(),
        "--audio-quality".to_string(),
        "0".to_string(),
        "--no-playlist".to_string(),
        "--no-progress".to_string(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "--output".to_string(),
        output_template(destination).to_string_lossy().into_owned(),
    ];

    if let Some(ref cookies) = options.cookie_file {
        args.push("--cookies".to_string());
        args.push(cookies.to_string_lossy().into_owned());
    }

    args.push(format!("{}{}", WATCH_URL, catalog_id));
    args
}

/// yt-dlp picks the extension itself, so hand it `<stem>.%(ext)s`
fn output_template(destination: &Path) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!("{}.%(ext)s", stem))
}

/// yt-dlp prints a lot; the last `ERROR:` line is the useful one
fn last_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| stderr.lines().rev().find(|l| !l.trim().is_empty()))
        .unwrap_or("")
        .trim()
        .to_string()
}
