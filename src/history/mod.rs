//! Listening-history loading.
//!
//! Raw streaming-history exports are folded into one [`AggregatedTrack`] per
//! source track URI, ordered by play count, then collapsed by
//! (artist, title) so re-releases of the same song are fetched once.
//!
//! Two entry points:
//! - [`load_export_dir`] reads every `Streaming_History_Audio_*.json` file
//!   in a directory
//! - [`load_preprocessed`] reads a previously saved aggregated list

mod dedup;
mod parser;

use serde::{Deserialize, Serialize};

pub use dedup::deduplicate;
pub use parser::{load_export_dir, load_input, load_preprocessed, save_preprocessed};

/// File name prefix of a streaming-history export
pub const EXPORT_FILE_PREFIX: &str = "Streaming_History_Audio_";

/// One raw play from a streaming-history export.
///
/// Only the fields this tool needs are kept; everything else in the export
/// is ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeningEvent {
    /// When the play ended (ISO-8601)
    pub ts: String,
    /// `spotify:track:<id>`; absent for podcasts and local files
    pub spotify_track_uri: Option<String>,
    pub master_metadata_track_name: Option<String>,
    pub master_metadata_album_artist_name: Option<String>,
    pub master_metadata_album_album_name: Option<String>,
}

/// All plays of one track, merged.
///
/// This is also the on-disk shape of the pre-processed history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedTrack {
    /// Play timestamps, ascending. Never empty.
    pub timestamps: Vec<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub spotify_track_uri: String,
}

impl AggregatedTrack {
    /// Number of recorded plays
    pub fn play_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Final colon-delimited segment of the URI (`spotify:track:abc` → `abc`)
    pub fn source_track_id(&self) -> &str {
        source_track_id(&self.spotify_track_uri)
    }

    /// Title and artist, both present and non-blank
    pub fn title_and_artist(&self) -> Option<(&str, &str)> {
        let title = self.track_name.as_deref().filter(|s| !s.trim().is_empty())?;
        let artist = self.artist_name.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((title, artist))
    }
}

/// Final colon-delimited segment of a source URI
pub fn source_track_id(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}
