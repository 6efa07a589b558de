//! HTTP corpus fetcher
//!
//! [`CorpusFetcher`] adapter over `reqwest`. One GET per category; any
//! non-success status, transport failure or undecodable body is reported as
//! a [`FetchError`] for the resolver to absorb.

use async_trait::async_trait;
use hitokoto_application::{CorpusFetcher, FetchError};
use hitokoto_domain::QuoteRecord;
use std::time::Duration;
use tracing::debug;

/// User agent sent with every corpus request
const USER_AGENT: &str = concat!("hitokoto/", env!("CARGO_PKG_VERSION"));

/// Fetches category files over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpCorpusFetcher {
    client: reqwest::Client,
}

impl HttpCorpusFetcher {
    /// Create a fetcher; `timeout` bounds each request when set
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl CorpusFetcher for HttpCorpusFetcher {
    async fn fetch_category(&self, url: &str) -> Result<Vec<QuoteRecord>, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
