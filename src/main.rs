//! listen-fetch - download the music in a Spotify listening history.
//!
//! Reads a listening-history export, collapses it into one record per
//! unique track, finds each track on YouTube Music and downloads it with
//! yt-dlp. Tracks already in the output directory are skipped, so the tool
//! can be re-run on the same export to pick up where it left off.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod pipeline;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let directive = if args.verbose {
        "listen_fetch=debug"
    } else {
        "listen_fetch=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    cli::run_command(&args)
}
