//! Corpus fetcher port
//!
//! Defines how the application layer obtains one category's quotes from a
//! remote source.

use async_trait::async_trait;
use hitokoto_domain::QuoteRecord;
use thiserror::Error;

/// Errors that can occur while fetching one category
///
/// These never reach a caller: resolution replaces the category with its
/// local copy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Source of remote category data
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CorpusFetcher: Send + Sync {
    /// Fetch the quote array published at `url`
    async fn fetch_category(&self, url: &str) -> Result<Vec<QuoteRecord>, FetchError>;
}
