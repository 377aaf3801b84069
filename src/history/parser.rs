//! Export discovery, parsing and aggregation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{AggregatedTrack, EXPORT_FILE_PREFIX, ListeningEvent, deduplicate};
use crate::error::{Error, Result, ResultExt};

/// Load history from either an export directory or a pre-processed JSON file
pub fn load_input(path: &Path) -> Result<Vec<AggregatedTrack>> {
    if path.is_dir() {
        load_export_dir(path)
    } else if path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    {
        load_preprocessed(path)
    } else {
        Err(Error::invalid_input(path))
    }
}

/// Find all export files in a directory, sorted by file name
pub fn find_export_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(format!("reading {}", dir.display()))?
        .filter_map(readable_file)
        .filter(|p| is_export_file(p))
        .collect();

    if files.is_empty() {
        return Err(Error::NoHistoryFilesFound(dir.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

/// Path of a regular file entry; unreadable entries are logged and skipped
fn readable_file(entry: std::io::Result<std::fs::DirEntry>) -> Option<PathBuf> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Skipping unreadable directory entry: {}", e);
            return None;
        }
    };
    match entry.file_type() {
        Ok(t) if t.is_file() => Some(entry.path()),
        Ok(_) => None,
        Err(e) => {
            warn!("Skipping {:?}: {}", entry.path(), e);
            None
        }
    }
}

fn is_export_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(EXPORT_FILE_PREFIX) && n.ends_with(".json"))
}

/// Parse every export in `dir` and return deduplicated, play-count ordered tracks.
///
/// A file that fails to parse is logged and skipped.
pub fn load_export_dir(dir: &Path) -> Result<Vec<AggregatedTrack>> {
    let files = find_export_files(dir)?;
    info!("Found {} history file(s) in {:?}", files.len(), dir);

    let mut events = Vec::new();
    for file in &files {
        match parse_export_file(file) {
            Ok(parsed) => {
                debug!("{:?}: {} events", file, parsed.len());
                events.extend(parsed);
            }
            Err(e) => warn!("Skipping history file: {}", e),
        }
    }

    let tracks = aggregate(events);
    let unique = deduplicate(tracks);
    info!("Aggregated {} unique tracks", unique.len());
    Ok(unique)
}

fn parse_export_file(path: &Path) -> Result<Vec<ListeningEvent>> {
    let contents = std::fs::read_to_string(path).with_context(format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).map_err(|source| Error::HistoryParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fold plays into one record per track URI.
///
/// Metadata comes from the first event seen for each URI. The output is
/// sorted by play count descending; equal counts keep first-seen order.
pub fn aggregate(events: impl IntoIterator<Item = ListeningEvent>) -> Vec<AggregatedTrack> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tracks: Vec<AggregatedTrack> = Vec::new();

    for event in events {
        let Some(uri) = event.spotify_track_uri else {
            continue;
        };

        match index.get(&uri) {
            Some(&i) => tracks[i].timestamps.push(event.ts),
            None => {
                index.insert(uri.clone(), tracks.len());
                tracks.push(AggregatedTrack {
                    timestamps: vec![event.ts],
                    track_name: event.master_metadata_track_name,
                    artist_name: event.master_metadata_album_artist_name,
                    album_name: event.master_metadata_album_album_name,
                    spotify_track_uri: uri,
                });
            }
        }
    }

    for track in &mut tracks {
        track.timestamps.sort();
    }
    // Stable sort keeps first-seen order among equal counts
    tracks.sort_by(|a, b| b.play_count().cmp(&a.play_count()));
    tracks
}

/// Load a list previously written by [`save_preprocessed`]
pub fn load_preprocessed(path: &Path) -> Result<Vec<AggregatedTrack>> {
    let contents = std::fs::read_to_string(path).with_context(format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    if !value.is_array() {
        return Err(Error::InvalidHistoryFileFormat(path.to_path_buf()));
    }

    let tracks: Vec<AggregatedTrack> = serde_json::from_value(value)?;
    let tracks: Vec<AggregatedTrack> = tracks
        .into_iter()
        .filter(|t| {
            let played = !t.timestamps.is_empty();
            if !played {
                warn!("Dropping {} from {:?}: no timestamps", t.spotify_track_uri, path);
            }
            played
        })
        .collect();
    info!("Loaded {} pre-processed tracks from {:?}", tracks.len(), path);
    Ok(deduplicate(tracks))
}

/// Write the aggregated list as pretty JSON
///
/// Creates the parent directory if needed and writes atomically
/// (temp file, then rename).
pub fn save_preprocessed(tracks: &[AggregatedTrack], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(format!("creating {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(tracks)?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, contents).with_context(format!("writing {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path).with_context(format!("renaming to {}", path.display()))?;

    info!("Saved {} tracks to {:?}", tracks.len(), path);
    Ok(())
}
