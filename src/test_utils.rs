//! Test utilities and fixtures for listen-fetch tests.
//!
//! Builders for history records and catalog candidates, plus a helper for
//! writing export files into a temp directory.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{aggregated, candidate};
//!
//! let track = aggregated("spotify:track:A", "Song", "Artist", 3);
//! let hit = candidate("dQw4w9WgXcQ", "Song", &["Artist"], 212);
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogAlbum, CatalogArtist, CatalogCandidate, Thumbnail, TrackDuration};
use crate::history::{AggregatedTrack, ListeningEvent};

/// Creates a raw listening event.
pub fn event(ts: &str, uri: Option<&str>, track: &str, artist: &str) -> ListeningEvent {
    ListeningEvent {
        ts: ts.to_string(),
        spotify_track_uri: uri.map(String::from),
        master_metadata_track_name: Some(track.to_string()),
        master_metadata_album_artist_name: Some(artist.to_string()),
        master_metadata_album_album_name: Some("Test Album".to_string()),
    }
}

/// Creates an aggregated track with `plays` synthetic timestamps.
pub fn aggregated(uri: &str, track: &str, artist: &str, plays: usize) -> AggregatedTrack {
    AggregatedTrack {
        timestamps: (0..plays)
            .map(|i| format!("2023-01-01T00:00:{:02}Z", i))
            .collect(),
        track_name: Some(track.to_string()),
        artist_name: Some(artist.to_string()),
        album_name: Some("Test Album".to_string()),
        spotify_track_uri: uri.to_string(),
    }
}

/// Creates a catalog candidate with the given duration in seconds.
pub fn candidate(id: &str, title: &str, artists: &[&str], seconds: u32) -> CatalogCandidate {
    CatalogCandidate {
        id: id.to_string(),
        title: Some(title.to_string()),
        artists: artists
            .iter()
            .map(|name| CatalogArtist {
                id: None,
                name: name.to_string(),
            })
            .collect(),
        duration: Some(TrackDuration {
            seconds,
            text: format!("{}:{:02}", seconds / 60, seconds % 60),
        }),
        album: Some(CatalogAlbum {
            id: Some("MPREb_test".to_string()),
            name: "Test Album".to_string(),
        }),
        thumbnails: vec![Thumbnail {
            url: format!("https://lh3.googleusercontent.com/{}", id),
            width: 60,
            height: 60,
        }],
    }
}

/// Writes a file into `dir` and returns its path.
pub fn write_export(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}
