//! YouTube Music search response Data Transfer Objects
//!
//! These types mirror the subset of the `youtubei/v1/search` response we
//! read. Everything is optional or defaulted: the renderer tree is large and
//! changes often, and a missing branch just means "no results there".
//! DO NOT use these types outside the ytmusic module - convert to domain types.
//!
//! Shape of a song result (abridged):
//! ```json
//! {"contents": {"tabbedSearchResultsRenderer": {"tabs": [{"tabRenderer": {"content":
//!   {"sectionListRenderer": {"contents": [{"musicShelfRenderer": {"contents": [
//!     {"musicResponsiveListItemRenderer": {
//!       "playlistItemData": {"videoId": "..."},
//!       "thumbnail": {"musicThumbnailRenderer": {"thumbnail": {"thumbnails": [...]}}},
//!       "flexColumns": [
//!         {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "Title"}]}}},
//!         {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [
//!           {"text": "Artist", "navigationEndpoint": {"browseEndpoint": {...}}},
//!           {"text": " • "}, {"text": "Album", ...}, {"text": " • "}, {"text": "3:45"}
//!         ]}}}
//!       ]}}
//!   ]}}]}}}]}}}
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub contents: Option<SearchContents>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContents {
    pub tabbed_search_results_renderer: Option<TabbedResults>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabbedResults {
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_renderer: Option<TabRenderer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabRenderer {
    pub content: Option<TabContent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabContent {
    pub section_list_renderer: Option<SectionList>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionList {
    #[serde(default)]
    pub contents: Vec<Section>,
}

/// A section is a shelf of results, or something else we ignore
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub music_shelf_renderer: Option<MusicShelf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicShelf {
    #[serde(default)]
    pub contents: Vec<ShelfItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfItem {
    pub music_responsive_list_item_renderer: Option<ListItem>,
}

/// One result row
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    #[serde(default)]
    pub flex_columns: Vec<FlexColumn>,
    pub playlist_item_data: Option<PlaylistItemData>,
    pub thumbnail: Option<ThumbnailContainer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexColumn {
    pub music_responsive_list_item_flex_column_renderer: Option<FlexColumnRenderer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlexColumnRenderer {
    pub text: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Text {
    #[serde(default)]
    pub runs: Vec<Run>,
}

/// A text fragment, optionally linking somewhere
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: String,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEndpoint {
    pub watch_endpoint: Option<WatchEndpoint>,
    pub browse_endpoint: Option<BrowseEndpoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEndpoint {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpoint {
    pub browse_id: String,
    pub browse_endpoint_context_supported_configs: Option<BrowseConfigs>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseConfigs {
    pub browse_endpoint_context_music_config: Option<MusicConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicConfig {
    /// e.g. `MUSIC_PAGE_TYPE_ARTIST`, `MUSIC_PAGE_TYPE_ALBUM`
    pub page_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemData {
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailContainer {
    pub music_thumbnail_renderer: Option<MusicThumbnailRenderer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicThumbnailRenderer {
    pub thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThumbnailList {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Request body for the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub context: RequestContext<'a>,
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContext<'a> {
    pub client: ClientInfo<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo<'a> {
    pub client_name: &'a str,
    pub client_version: &'a str,
    pub hl: &'a str,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
