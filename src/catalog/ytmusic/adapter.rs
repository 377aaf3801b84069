//! Adapter layer: Convert YouTube Music DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! Rows that don't carry a video id are dropped here, so nothing downstream
//! ever sees a half-formed candidate.

use super::dto;
use crate::catalog::domain::{
    CatalogAlbum, CatalogArtist, CatalogCandidate, Thumbnail, TrackDuration,
};

const PAGE_TYPE_ARTIST: &str = "MUSIC_PAGE_TYPE_ARTIST";
const PAGE_TYPE_ALBUM: &str = "MUSIC_PAGE_TYPE_ALBUM";
const SEPARATOR: &str = "•";

/// Result-type labels that appear in the subtitle column of mixed results
const TYPE_LABELS: &[&str] = &["Song", "Video", "Episode", "Single", "EP", "Album"];

/// Convert a search response into candidates, preserving result order
pub fn to_candidates(response: dto::SearchResponse) -> Vec<CatalogCandidate> {
    response
        .contents
        .and_then(|c| c.tabbed_search_results_renderer)
        .map(|t| t.tabs)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tab| tab.tab_renderer?.content?.section_list_renderer)
        .flat_map(|list| list.contents)
        .filter_map(|section| section.music_shelf_renderer)
        .flat_map(|shelf| shelf.contents)
        .filter_map(|item| item.music_responsive_list_item_renderer)
        .filter_map(to_candidate)
        .collect()
}

/// Convert one result row
fn to_candidate(item: dto::ListItem) -> Option<CatalogCandidate> {
    let mut columns = item
        .flex_columns
        .into_iter()
        .map(|c| {
            c.music_responsive_list_item_flex_column_renderer
                .and_then(|r| r.text)
                .unwrap_or_default()
                .runs
        });

    let title_runs = columns.next().unwrap_or_default();
    let detail_runs = columns.next().unwrap_or_default();

    let id = item
        .playlist_item_data
        .map(|p| p.video_id)
        .or_else(|| title_runs.iter().find_map(watch_video_id))?;

    let title = Some(
        title_runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<String>(),
    )
    .filter(|t| !t.trim().is_empty());

    let details = parse_details(&detail_runs);

    let thumbnails = item
        .thumbnail
        .and_then(|t| t.music_thumbnail_renderer)
        .and_then(|r| r.thumbnail)
        .map(|l| l.thumbnails)
        .unwrap_or_default()
        .into_iter()
        .map(|t| Thumbnail {
            url: t.url,
            width: t.width,
            height: t.height,
        })
        .collect();

    Some(CatalogCandidate {
        id,
        title,
        artists: details.artists,
        duration: details.duration,
        album: details.album,
        thumbnails,
    })
}

/// Artist, album and duration extracted from the subtitle column
struct Details {
    artists: Vec<CatalogArtist>,
    album: Option<CatalogAlbum>,
    duration: Option<TrackDuration>,
}

/// Parse the "Artist • Album • 3:45" column.
///
/// Linked runs are classified by the page type they point to. When no run
/// links to an artist page, the first plain text run is taken as the artist.
fn parse_details(runs: &[dto::Run]) -> Details {
    let mut artists = Vec::new();
    let mut album = None;
    let mut duration = None;
    let mut plain_text = Vec::new();

    for run in runs {
        let text = run.text.trim();
        if text.is_empty() || text == SEPARATOR || text == "&" || text == "," {
            continue;
        }

        match browse_target(run) {
            Some((PAGE_TYPE_ARTIST, browse_id)) => artists.push(CatalogArtist {
                id: Some(browse_id.to_string()),
                name: text.to_string(),
            }),
            Some((PAGE_TYPE_ALBUM, browse_id)) => {
                album = Some(CatalogAlbum {
                    id: Some(browse_id.to_string()),
                    name: text.to_string(),
                })
            }
            _ => {
                if let Some(seconds) = parse_duration_text(text) {
                    duration = Some(TrackDuration {
                        seconds,
                        text: text.to_string(),
                    });
                } else if !TYPE_LABELS.contains(&text) {
                    plain_text.push(text);
                }
            }
        }
    }

    if artists.is_empty()
        && let Some(first) = plain_text.first()
    {
        artists.push(CatalogArtist {
            id: None,
            name: first.to_string(),
        });
    }

    Details {
        artists,
        album,
        duration,
    }
}

fn watch_video_id(run: &dto::Run) -> Option<String> {
    run.navigation_endpoint
        .as_ref()?
        .watch_endpoint
        .as_ref()?
        .video_id
        .clone()
}

/// (page type, browse id) of a linked run
fn browse_target(run: &dto::Run) -> Option<(&str, &str)> {
    let browse = run.navigation_endpoint.as_ref()?.browse_endpoint.as_ref()?;
    let page_type = browse
        .browse_endpoint_context_supported_configs
        .as_ref()?
        .browse_endpoint_context_music_config
        .as_ref()?
        .page_type
        .as_str();
    Some((page_type, browse.browse_id.as_str()))
}

/// Parse `m:ss` or `h:mm:ss` into seconds
pub fn parse_duration_text(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut total: u32 = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        // Minutes and seconds after the leading field are two-digit, < 60
        if i > 0 && (part.len() != 2 || value >= 60) {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}
