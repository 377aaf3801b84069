//! Trait definition for the catalog search client.
//!
//! The matcher only depends on [`CatalogSearch`], so tests can substitute
//! a mock that returns canned candidates without touching the network.

use async_trait::async_trait;

use super::domain::{CatalogCandidate, CatalogError, SearchFilter};

/// Free-text search against the external catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Return candidates in the catalog's relevance order.
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
    ) -> Result<Vec<CatalogCandidate>, CatalogError>;
}

#[async_trait]
impl CatalogSearch for super::ytmusic::YtMusicClient {
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        self.search(query, filter).await
    }
}
