//! Fetch orchestration - drives match → skip check → download for each track.
//!
//! Processing is strictly sequential: one track is resolved and downloaded
//! (or abandoned) before the next begins. Per-track failures are counted,
//! never retried, and never abort the run.
//!
//! Per-track flow:
//! 1. Tracks without title or artist fail immediately
//! 2. Ask the [`CatalogMatcher`] for a usable candidate
//! 3. Short fixed pause to go easy on the search service
//! 4. Skip if the candidate's catalog id is already on disk
//! 5. Download, then verify the output file exists
//! 6. Random wait before the next track

pub mod throttle;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::catalog::{CatalogMatcher, CatalogSearch};
use crate::fetch::naming::build_file_name;
use crate::fetch::{AudioFetcher, FetchError, FetchOptions};
use crate::history::AggregatedTrack;
use crate::scanner::KnownIdentities;
use throttle::{Sleeper, WaitRange};

/// Pause after each successful match, before downloading
pub const MATCH_PAUSE: Duration = Duration::from_secs(1);

/// What happened to one track
#[derive(Debug)]
pub enum FetchOutcome {
    /// Downloaded to this path
    Successful(PathBuf),
    Failed(FailureReason),
    Skipped(SkipReason),
}

#[derive(Debug)]
pub enum FailureReason {
    /// Track name or artist name missing from history
    MissingMetadata,
    /// No usable catalog candidate (none found, or excluded)
    NoMatch,
    /// Downloader failed or produced no file
    Fetch(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Catalog id already present in the output directory
    AlreadyPresent,
}

/// Run-level counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl FetchStats {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Successful(_) => self.successful += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed + self.skipped
    }
}

/// Static settings for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub fetch_options: FetchOptions,
    pub wait: WaitRange,
}

pub struct FetchPipeline<S, F, T> {
    matcher: CatalogMatcher<S>,
    fetcher: F,
    sleeper: T,
    known: KnownIdentities,
    config: PipelineConfig,
}

impl<S, F, T> FetchPipeline<S, F, T>
where
    S: CatalogSearch,
    F: AudioFetcher,
    T: Sleeper,
{
    pub fn new(
        matcher: CatalogMatcher<S>,
        fetcher: F,
        sleeper: T,
        known: KnownIdentities,
        config: PipelineConfig,
    ) -> Self {
        Self {
            matcher,
            fetcher,
            sleeper,
            known,
            config,
        }
    }

    /// Process every track in order and return the counters
    pub async fn run(&self, tracks: &[AggregatedTrack]) -> FetchStats {
        let mut stats = FetchStats::default();
        let total = tracks.len();

        for (i, track) in tracks.iter().enumerate() {
            info!(
                "[{}/{}] {} - {}",
                i + 1,
                total,
                track.track_name.as_deref().unwrap_or("?"),
                track.artist_name.as_deref().unwrap_or("?")
            );

            let outcome = self.process(track).await;
            log_outcome(&outcome);
            stats.record(&outcome);

            if i + 1 < total {
                self.sleeper.sleep(self.config.wait.sample()).await;
            }
        }

        info!(
            "Finished: {} successful, {} failed, {} skipped",
            stats.successful, stats.failed, stats.skipped
        );
        stats
    }

    /// Resolve and download a single track
    pub async fn process(&self, track: &AggregatedTrack) -> FetchOutcome {
        let Some((title, artist)) = track.title_and_artist() else {
            return FetchOutcome::Failed(FailureReason::MissingMetadata);
        };

        let Some(candidate) = self.matcher.find_match(title, artist).await else {
            return FetchOutcome::Failed(FailureReason::NoMatch);
        };

        self.sleeper.sleep(MATCH_PAUSE).await;

        if self.known.has_catalog_id(&candidate.id) {
            return FetchOutcome::Skipped(SkipReason::AlreadyPresent);
        }

        let file_name = build_file_name(
            title,
            artist,
            &candidate.id,
            track.source_track_id(),
            &self.config.fetch_options.audio_format,
        );
        let destination = self.config.output_dir.join(file_name);

        if let Err(e) = self
            .fetcher
            .fetch(&candidate.id, &destination, &self.config.fetch_options)
            .await
        {
            return FetchOutcome::Failed(FailureReason::Fetch(e));
        }

        if !destination.is_file() {
            return FetchOutcome::Failed(FailureReason::Fetch(FetchError::OutputMissing(
                destination,
            )));
        }

        FetchOutcome::Successful(destination)
    }
}

fn log_outcome(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Successful(path) => info!("  ✓ Saved {:?}", path),
        FetchOutcome::Skipped(SkipReason::AlreadyPresent) => info!("  - Already downloaded"),
        FetchOutcome::Failed(FailureReason::MissingMetadata) => {
            warn!("  ✗ Missing track or artist name")
        }
        FetchOutcome::Failed(FailureReason::NoMatch) => warn!("  ✗ No usable match"),
        FetchOutcome::Failed(FailureReason::Fetch(e)) => warn!("  ✗ {}", e),
    }
}

/// Drop tracks whose source id already has an output file.
///
/// Returns the remaining tracks and how many were removed.
pub fn without_known(
    tracks: Vec<AggregatedTrack>,
    known: &KnownIdentities,
) -> (Vec<AggregatedTrack>, usize) {
    let before = tracks.len();
    let remaining: Vec<_> = tracks
        .into_iter()
        .filter(|t| !known.has_source_track(t.source_track_id()))
        .collect();
    let removed = before - remaining.len();
    (remaining, removed)
}
