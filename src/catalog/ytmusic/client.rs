//! YouTube Music HTTP client
//!
//! Talks to the same internal search endpoint the music.youtube.com web
//! client uses. No API key or login is needed for search.
//!
//! ## Request shape
//! - POST JSON with a `WEB_REMIX` client context
//! - `params` selects the result category; without it the response mixes
//!   songs, videos, albums and artists in separate shelves
//! - `Origin`/`Referer` must point at music.youtube.com or the request is
//!   answered with a consent page instead of JSON

use std::time::Duration;

use super::{adapter, dto};
use crate::catalog::domain::{CatalogCandidate, CatalogError, SearchFilter};

const DEFAULT_BASE_URL: &str = "https://music.youtube.com/youtubei/v1";
const ORIGIN: &str = "https://music.youtube.com";
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240918.01.00";

/// Category filter token for the search endpoint
const SONGS_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; ",
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// YouTube Music search client
pub struct YtMusicClient {
    http_client: reqwest::Client,
    base_url: String,
    language: String,
}

impl YtMusicClient {
    /// Create a new client
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            language: "en".to_string(),
        })
    }

    /// Search the catalog and return candidates in result order
    pub async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        let response = self.send_search_request(query, filter).await?;
        if response.contents.is_none() {
            return Err(CatalogError::InvalidResponse(
                "search response has no contents".to_string(),
            ));
        }
        let candidates = adapter::to_candidates(response);
        tracing::debug!("'{}' returned {} candidates", query, candidates.len());
        Ok(candidates)
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        query: &str,
        filter: SearchFilter,
    ) -> Result<dto::SearchResponse, CatalogError> {
        let url = format!("{}/search?alt=json&prettyPrint=false", self.base_url);
        let body = dto::SearchRequest {
            context: dto::RequestContext {
                client: dto::ClientInfo {
                    client_name: CLIENT_NAME,
                    client_version: CLIENT_VERSION,
                    hl: &self.language,
                },
            },
            query,
            params: Some(filter_params(filter)),
        };

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ORIGIN, ORIGIN)
            .header(reqwest::header::REFERER, format!("{}/", ORIGIN))
            .json(&body)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiErrorResponse>().await {
                return Err(CatalogError::Api(format!(
                    "{} {}",
                    error.error.code, error.error.message
                )));
            }
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

fn filter_params(filter: SearchFilter) -> &'static str {
    match filter {
        SearchFilter::Songs => SONGS_PARAMS,
    }
}
