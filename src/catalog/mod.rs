//! Catalog lookup - resolves history entries to downloadable catalog items.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Internal candidate types
//! - **API DTOs** (`ytmusic/dto.rs`) - Exact search response shapes
//! - **Adapter** (`ytmusic/adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`ytmusic/client.rs`) - HTTP client for the search endpoint
//! - **Traits** (`traits.rs`) - The search seam, with mocks for tests
//! - **Matcher** (`matcher.rs`) - Picks one candidate and applies exclusions
//!
//! # Usage
//!
//! ```ignore
//! use catalog::{CatalogMatcher, MatchPolicy, YtMusicClient};
//!
//! let matcher = CatalogMatcher::new(YtMusicClient::new()?, MatchPolicy {
//!     max_duration_secs: 600,
//!     blacklist: vec!["karaoke".into()],
//! });
//! if let Some(hit) = matcher.find_match("Song", "Artist").await {
//!     println!("{} -> {}", hit.title.unwrap_or_default(), hit.id);
//! }
//! ```

pub mod domain;
pub mod matcher;
pub mod traits;
pub mod ytmusic;

pub use domain::{
    CatalogAlbum, CatalogArtist, CatalogCandidate, CatalogError, SearchFilter, Thumbnail,
    TrackDuration,
};
pub use matcher::{CatalogMatcher, Exclusion, MatchKind, MatchPolicy};
pub use traits::CatalogSearch;
pub use ytmusic::YtMusicClient;
