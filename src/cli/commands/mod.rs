//! CLI command definitions and dispatch.
//!
//! Without a subcommand the tool runs the download pipeline on the
//! positional input path. Handlers live in their own submodules:
//! - `download`: history → match → fetch pipeline
//! - `tools`: external tool checks

mod download;
mod tools;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Overrides;

pub use download::cmd_download;
pub use tools::cmd_check_tools;

/// Download the tracks from a Spotify listening-history export
#[derive(Parser)]
#[command(author, version, about, long_about = None, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub download: DownloadArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Check if yt-dlp is installed
    CheckTools,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Export directory (Streaming_History_Audio_*.json) or a pre-processed history file
    #[arg(required = true)]
    pub input: Option<PathBuf>,

    /// Directory to save audio files into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Audio format passed to the downloader (mp3, m4a, opus, ...)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Reject matches longer than this many seconds
    #[arg(long)]
    pub max_duration: Option<u32>,

    /// Comma-separated keywords that reject a match (e.g. "live,karaoke")
    #[arg(long)]
    pub blacklist: Option<String>,

    /// Minimum wait between downloads in seconds
    #[arg(long)]
    pub min_wait: Option<u64>,

    /// Maximum wait between downloads in seconds
    #[arg(long)]
    pub max_wait: Option<u64>,

    /// Pass the configured cookie file to the downloader
    #[arg(long)]
    pub use_cookies: bool,

    /// Save the aggregated history next to the downloads
    #[arg(long)]
    pub save_history: bool,

    /// Only process the first N tracks not already downloaded
    #[arg(long)]
    pub limit: Option<usize>,

    /// Config file to use instead of the default location
    #[arg(long, env = "LISTEN_FETCH_CONFIG")]
    pub config: Option<PathBuf>,
}

impl DownloadArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            output_dir: self.output_dir.clone(),
            audio_format: self.format.clone(),
            max_duration_secs: self.max_duration,
            blacklist: self.blacklist.clone(),
            min_wait_secs: self.min_wait,
            max_wait_secs: self.max_wait,
            use_cookies: self.use_cookies,
            save_history: self.save_history,
            limit: self.limit,
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::CheckTools) => cmd_check_tools(),
        None => {
            let Some(input) = cli.download.input.as_deref() else {
                anyhow::bail!("an input path is required");
            };
            let rt = Runtime::new()?;
            cmd_download(&rt, input, &cli.download)
        }
    }
}

/// Print installation instructions for yt-dlp
pub(crate) fn print_ytdlp_install_instructions() {
    eprintln!("Error: yt-dlp not found.");
    eprintln!("Install yt-dlp (and ffmpeg for transcoding):");
    eprintln!("  Windows: winget install yt-dlp.yt-dlp");
    eprintln!("  macOS:   brew install yt-dlp");
    eprintln!("  Linux:   pipx install yt-dlp");
}
