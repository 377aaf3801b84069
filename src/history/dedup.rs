use std::collections::HashSet;

use super::AggregatedTrack;

/// Drop tracks whose (artist, title) pair was already seen.
///
/// Comparison is exact and case-sensitive. The first occurrence wins, so
/// feeding in a play-count ordered list keeps the most-played release.
pub fn deduplicate(tracks: Vec<AggregatedTrack>) -> Vec<AggregatedTrack> {
    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::with_capacity(tracks.len());

    tracks
        .into_iter()
        .filter(|t| seen.insert((t.artist_name.clone(), t.track_name.clone())))
        .collect()
}
