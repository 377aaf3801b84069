//! The history → match → fetch pipeline command.

use std::path::Path;

use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::catalog::{CatalogMatcher, MatchPolicy, YtMusicClient};
use crate::config::{self, Settings};
use crate::error::{Error, ResultExt};
use crate::fetch::{FetchError, FetchOptions, YtDlpFetcher};
use crate::pipeline::throttle::{TokioSleeper, WaitRange};
use crate::pipeline::{self, FetchPipeline, PipelineConfig};
use crate::{history, scanner};

use super::{DownloadArgs, print_ytdlp_install_instructions};

/// Match every track in a listening history and download it
pub fn cmd_download(rt: &Runtime, input: &Path, args: &DownloadArgs) -> anyhow::Result<()> {
    // The downloader is required; check before doing any work
    let fetcher = require_tool(YtDlpFetcher::locate())?;

    let config = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let settings = Settings::resolve(config, args.overrides())?;
    debug!("Settings: {:?}", settings);

    let tracks = history::load_input(input)?;
    let loaded = tracks.len();
    println!("Loaded {} unique track(s) from {:?}", loaded, input);

    if settings.save_history {
        let path = settings.history_output_path();
        history::save_preprocessed(&tracks, &path)?;
        println!("Saved processed history to {:?}", path);
    }

    std::fs::create_dir_all(&settings.output_dir)
        .with_context(format!("creating output directory {:?}", settings.output_dir))?;

    let known = scanner::scan_existing(&settings.output_dir, &settings.audio_format);
    let (mut tracks, already_present) = pipeline::without_known(tracks, &known);
    if let Some(limit) = settings.limit {
        tracks.truncate(limit);
    }

    println!(
        "{} already downloaded, {} to process",
        already_present,
        tracks.len()
    );
    if tracks.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    let stats = rt.block_on(async {
        let client = YtMusicClient::new().map_err(Error::from)?;
        let matcher = CatalogMatcher::new(
            client,
            MatchPolicy {
                max_duration_secs: settings.max_duration_secs,
                blacklist: settings.blacklist.clone(),
            },
        );
        let config = PipelineConfig {
            output_dir: settings.output_dir.clone(),
            fetch_options: FetchOptions {
                audio_format: settings.audio_format.clone(),
                cookie_file: settings.cookie_file.clone(),
            },
            wait: WaitRange::new(settings.min_wait_secs, settings.max_wait_secs),
        };

        info!("Starting downloads into {:?}", settings.output_dir);
        let pipeline = FetchPipeline::new(matcher, fetcher, TokioSleeper, known, config);
        Ok::<_, Error>(pipeline.run(&tracks).await)
    })?;

    println!();
    println!("=== Summary ===");
    println!("Tracks loaded:      {}", loaded);
    println!("Already present:    {}", already_present);
    println!("Processed:          {}", stats.total());
    println!("Successful:         {}", stats.successful);
    println!("Failed:             {}", stats.failed);
    println!("Skipped:            {}", stats.skipped);

    Ok(())
}

/// Turn a failed tool lookup into the fatal startup error
fn require_tool<T>(located: Result<T, FetchError>) -> Result<T, Error> {
    located.map_err(|e| {
        print_ytdlp_install_instructions();
        Error::from(e)
    })
}
