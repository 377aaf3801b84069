//! Pick the catalog entry for a (title, artist) pair.
//!
//! Selection is deterministic: the first exact title+artist hit wins,
//! otherwise the first well-formed result. The chosen candidate is then
//! checked against the exclusion policy; a rejected pick is NOT replaced by
//! the next candidate.

use tracing::{debug, warn};

use super::domain::{CatalogCandidate, SearchFilter};
use super::traits::CatalogSearch;

/// Rules that disqualify a selected candidate
#[derive(Debug, Clone, Default)]
pub struct MatchPolicy {
    /// Reject anything longer than this many seconds
    pub max_duration_secs: u32,
    /// Reject if title or any artist contains one of these (case-insensitive)
    pub blacklist: Vec<String>,
}

/// Why a selected candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Exclusion {
    #[error("duration {seconds}s exceeds limit of {max}s")]
    DurationExceeded { seconds: u32, max: u32 },

    #[error("contains blacklisted keyword '{0}'")]
    BlacklistedKeyword(String),
}

/// How the candidate was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fallback,
}

pub struct CatalogMatcher<S> {
    search: S,
    policy: MatchPolicy,
}

impl<S: CatalogSearch> CatalogMatcher<S> {
    pub fn new(search: S, policy: MatchPolicy) -> Self {
        Self { search, policy }
    }

    #[cfg(test)]
    pub fn search(&self) -> &S {
        &self.search
    }

    /// Find a usable catalog entry, or `None`.
    ///
    /// Search failures are logged and treated as "no match".
    pub async fn find_match(&self, title: &str, artist: &str) -> Option<CatalogCandidate> {
        let (title, artist) = (title.trim(), artist.trim());
        if title.is_empty() || artist.is_empty() {
            debug!("Skipping search for blank title/artist");
            return None;
        }

        let query = format!("{} {}", title, artist);
        let candidates = match self.search.search(&query, SearchFilter::Songs).await {
            Ok(c) => c,
            Err(e) => {
                warn!("Search failed for '{}': {}", query, e);
                return None;
            }
        };

        let Some((candidate, kind)) = select_candidate(&candidates, title, artist) else {
            debug!("No candidates for '{}'", query);
            return None;
        };

        if let Some(reason) = check_exclusions(candidate, &self.policy) {
            warn!(
                "Rejected '{}' by {} ({}): {}",
                candidate.title.as_deref().unwrap_or("?"),
                candidate.artist_line(),
                candidate.id,
                reason
            );
            return None;
        }

        debug!("{:?} match for '{}': {}", kind, query, candidate.id);
        Some(candidate.clone())
    }
}

/// Exact title+artist match first, then the first result with a title and
/// at least one artist.
pub fn select_candidate<'a>(
    candidates: &'a [CatalogCandidate],
    title: &str,
    artist: &str,
) -> Option<(&'a CatalogCandidate, MatchKind)> {
    let target_title = normalize(title);
    let target_artist = normalize(artist);

    let exact = candidates.iter().find(|c| {
        c.title.as_deref().map(normalize).as_deref() == Some(target_title.as_str())
            && c.artists.iter().any(|a| normalize(&a.name) == target_artist)
    });
    if let Some(c) = exact {
        return Some((c, MatchKind::Exact));
    }

    candidates
        .first()
        .filter(|c| c.title.is_some() && !c.artists.is_empty())
        .map(|c| (c, MatchKind::Fallback))
}

/// First rule the candidate violates, if any
pub fn check_exclusions(candidate: &CatalogCandidate, policy: &MatchPolicy) -> Option<Exclusion> {
    if let Some(seconds) = candidate.duration_secs()
        && seconds > policy.max_duration_secs
    {
        return Some(Exclusion::DurationExceeded {
            seconds,
            max: policy.max_duration_secs,
        });
    }

    let title = candidate.title.as_deref().unwrap_or_default().to_lowercase();
    let artists: Vec<String> = candidate
        .artists
        .iter()
        .map(|a| a.name.to_lowercase())
        .collect();

    policy
        .blacklist
        .iter()
        .map(|k| (k, k.trim().to_lowercase()))
        .filter(|(_, needle)| !needle.is_empty())
        .find(|(_, needle)| title.contains(needle) || artists.iter().any(|a| a.contains(needle)))
        .map(|(keyword, _)| Exclusion::BlacklistedKeyword(keyword.clone()))
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::catalog::traits::mocks::MockCatalog;
    use crate::test_utils::candidate;

    fn policy(max: u32, blacklist: &[&str]) -> MatchPolicy {
        MatchPolicy {
            max_duration_secs: max,
            blacklist: blacklist.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_exact_match_takes_precedence() {
        let candidates = vec![
            candidate("first", "Song", &["Other"], 200),
            candidate("second", "Song", &["Artist"], 200),
        ];

        let (picked, kind) = select_candidate(&candidates, "Song", "Artist").unwrap();

        assert_eq!(picked.id, "second");
        assert_eq!(kind, MatchKind::Exact);
    }

    #[test]
    fn test_exact_match_ignores_case_and_whitespace() {
        let candidates = vec![
            candidate("first", "Something Else", &["Artist"], 200),
            candidate("second", "  sONG ", &["Feat", " ARTIST"], 200),
        ];

        let (picked, kind) = select_candidate(&candidates, "Song", "artist").unwrap();
        assert_eq!(picked.id, "second");
        assert_eq!(kind, MatchKind::Exact);
    }

    #[test]
    fn test_fallback_is_first_result() {
        let candidates = vec![
            candidate("first", "Song (Live)", &["Artist"], 200),
            candidate("second", "Song - Remix", &["Artist"], 200),
        ];

        let (picked, kind) = select_candidate(&candidates, "Song", "Artist").unwrap();
        assert_eq!(picked.id, "first");
        assert_eq!(kind, MatchKind::Fallback);
    }

    #[test]
    fn test_fallback_requires_title_and_artist() {
        let mut no_artist = candidate("first", "Song (Live)", &[], 200);
        assert!(select_candidate(std::slice::from_ref(&no_artist), "Song", "Artist").is_none());

        no_artist.artists = candidate("x", "x", &["Someone"], 1).artists;
        no_artist.title = None;
        assert!(select_candidate(&[no_artist], "Song", "Artist").is_none());
    }

    #[test]
    fn test_empty_results() {
        assert!(select_candidate(&[], "Song", "Artist").is_none());
    }

    #[test]
    fn test_duration_exclusion() {
        let c = candidate("long", "Song", &["Artist"], 500);
        assert_eq!(
            check_exclusions(&c, &policy(420, &[])),
            Some(Exclusion::DurationExceeded {
                seconds: 500,
                max: 420
            })
        );
        // Equal to the ceiling is allowed
        let c = candidate("edge", "Song", &["Artist"], 420);
        assert_eq!(check_exclusions(&c, &policy(420, &[])), None);
    }

    #[test]
    fn test_unknown_duration_is_not_excluded() {
        let mut c = candidate("id", "Song", &["Artist"], 9999);
        c.duration = None;
        assert_eq!(check_exclusions(&c, &policy(60, &[])), None);
    }

    #[test]
    fn test_blacklist_matches_title_or_artist() {
        let c = candidate("id", "Song (KARAOKE Version)", &["Artist"], 200);
        assert_eq!(
            check_exclusions(&c, &policy(600, &["karaoke"])),
            Some(Exclusion::BlacklistedKeyword("karaoke".to_string()))
        );

        let c = candidate("id", "Song", &["Artist", "Nightcore Squad"], 200);
        assert!(matches!(
            check_exclusions(&c, &policy(600, &["nightcore"])),
            Some(Exclusion::BlacklistedKeyword(_))
        ));

        let c = candidate("id", "Song", &["Artist"], 200);
        assert_eq!(check_exclusions(&c, &policy(600, &["karaoke", " "])), None);
    }

    #[tokio::test]
    async fn test_excluded_exact_match_abandons_track() {
        let mock = MockCatalog::with_results(vec![
            candidate("too-long", "Song", &["Artist"], 500),
            candidate("ok", "Song (Radio Edit)", &["Artist"], 200),
        ]);
        let matcher = CatalogMatcher::new(mock, policy(420, &[]));

        assert!(matcher.find_match("Song", "Artist").await.is_none());
    }

    #[tokio::test]
    async fn test_find_match_queries_songs() {
        let mock = MockCatalog::with_results(vec![candidate("hit", "Song", &["Artist"], 200)]);
        let matcher = CatalogMatcher::new(mock, policy(600, &[]));

        let found = matcher.find_match(" Song ", "Artist").await.unwrap();
        assert_eq!(found.id, "hit");

        let queries = matcher.search.queries.lock().unwrap();
        assert_eq!(queries[0], ("Song Artist".to_string(), SearchFilter::Songs));
    }

    #[tokio::test]
    async fn test_blank_input_skips_search() {
        let matcher = CatalogMatcher::new(MockCatalog::empty(), policy(600, &[]));

        assert!(matcher.find_match("  ", "Artist").await.is_none());
        assert!(matcher.find_match("Song", "").await.is_none());
        assert_eq!(matcher.search.query_count(), 0);
    }

    #[tokio::test]
    async fn test_search_error_is_no_match() {
        let mock = MockCatalog::with_error(CatalogError::RateLimited);
        let matcher = CatalogMatcher::new(mock, policy(600, &[]));

        assert!(matcher.find_match("Song", "Artist").await.is_none());
    }
}
