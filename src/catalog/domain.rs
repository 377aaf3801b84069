//! Internal domain models for catalog search results.
//!
//! These types are OUR types - they don't change when the catalog API
//! changes. Search responses are converted into them by the adapter as soon
//! as they arrive.

/// One search hit from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCandidate {
    /// Catalog identifier (YouTube video id)
    pub id: String,
    /// Track title
    pub title: Option<String>,
    /// Contributing artists, in credit order
    pub artists: Vec<CatalogArtist>,
    /// Track length
    pub duration: Option<TrackDuration>,
    /// Album the track appears on
    pub album: Option<CatalogAlbum>,
    /// Cover thumbnails, smallest first
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAlbum {
    pub id: Option<String>,
    pub name: String,
}

/// Duration as both a number and the catalog's display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDuration {
    pub seconds: u32,
    /// e.g. "3:45"
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Result category requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Songs,
}

impl CatalogCandidate {
    /// Artist names joined for display
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn duration_secs(&self) -> Option<u32> {
        self.duration.as_ref().map(|d| d.seconds)
    }
}

/// Errors that can occur while searching the catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use crate::test_utils::candidate;

    #[test]
    fn test_artist_line() {
        let c = candidate("id", "Song", &["One", "Two"], 200);
        assert_eq!(c.artist_line(), "One, Two");
        assert_eq!(c.duration_secs(), Some(200));
    }
}
