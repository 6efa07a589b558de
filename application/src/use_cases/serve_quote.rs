//! Serve Quote use case
//!
//! Runs one request through the pipeline: interpret parameters, resolve the
//! corpus, select a quote.

use crate::ports::corpus_fetcher::CorpusFetcher;
use crate::use_cases::resolve_corpus::ResolveCorpusUseCase;
use hitokoto_domain::{DomainError, Query, QuoteRecord, RawParams, parse_query, select_quote};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while serving a quote
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServeQuoteError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for ServeQuoteError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidParameter(m) => ServeQuoteError::InvalidParameter(m),
            DomainError::NotFound(m) => ServeQuoteError::NotFound(m),
        }
    }
}

/// The chosen quote together with the query that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSelection {
    pub query: Query,
    pub record: QuoteRecord,
}

/// Use case for serving one random quote
///
/// Selection draws from a [`StdRng`]; it is seeded from the OS unless a
/// seed is given, which makes runs reproducible.
pub struct ServeQuoteUseCase<F: CorpusFetcher + 'static> {
    resolver: Arc<ResolveCorpusUseCase<F>>,
    rng: Mutex<StdRng>,
}

impl<F: CorpusFetcher + 'static> ServeQuoteUseCase<F> {
    pub fn new(resolver: Arc<ResolveCorpusUseCase<F>>) -> Self {
        Self {
            resolver,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Execute the use case
    ///
    /// Parameter validation runs before any corpus resolution, so a bad
    /// request never triggers remote fetches.
    pub async fn execute(&self, params: &RawParams) -> Result<QuoteSelection, ServeQuoteError> {
        let query = parse_query(params)?;
        debug!(
            "Query: categories={:?} length={:?} mode={}",
            query.categories, query.length, query.mode
        );

        let corpus = self.resolver.execute().await;
        let default_category = &self.resolver.config().default_category;

        let record = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            select_quote(&corpus, &query, default_category, &mut *rng)?
        };

        debug!("Selected quote {} ({})", record.uuid, record.kind);
        Ok(QuoteSelection { query, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusConfig;
    use crate::ports::corpus_fetcher::FetchError;
    use async_trait::async_trait;
    use hitokoto_domain::{Corpus, OutputMode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetcher that always fails, leaving the local bundle in charge
    #[derive(Default)]
    struct OfflineFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CorpusFetcher for OfflineFetcher {
        async fn fetch_category(&self, _url: &str) -> Result<Vec<QuoteRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Transport("offline".to_string()))
        }
    }

    fn quote(kind: &str, id: u64, text: &str) -> QuoteRecord {
        QuoteRecord::new(id, format!("{}-{}", kind, id), text).with_kind(kind)
    }

    fn use_case(fetcher: Arc<OfflineFetcher>) -> ServeQuoteUseCase<OfflineFetcher> {
        let local = Corpus::new()
            .with_category("a", vec![quote("a", 1, "tiny"), quote("a", 2, "a medium sized quote")])
            .with_category("b", vec![quote("b", 1, "bee")]);
        let resolver = ResolveCorpusUseCase::new(fetcher, Arc::new(local), CorpusConfig::default());
        ServeQuoteUseCase::new(Arc::new(resolver)).with_seed(1)
    }

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        RawParams::from_pairs(pairs.iter().copied())
    }

    #[tokio::test]
    async fn test_serves_requested_category() {
        let use_case = use_case(Arc::new(OfflineFetcher::default()));

        let selection = use_case.execute(&params(&[("c", "b")])).await.unwrap();

        assert_eq!(selection.record.uuid, "b-1");
        assert_eq!(selection.query.mode, OutputMode::Json);
    }

    #[tokio::test]
    async fn test_length_bounds_hold() {
        let use_case = use_case(Arc::new(OfflineFetcher::default()));

        for _ in 0..20 {
            let selection = use_case
                .execute(&params(&[("min_length", "3"), ("max_length", "4")]))
                .await
                .unwrap();
            assert!((3..=4).contains(&selection.record.length));
        }
    }

    #[tokio::test]
    async fn test_invalid_parameters_skip_resolution() {
        let fetcher = Arc::new(OfflineFetcher::default());
        let use_case = use_case(Arc::clone(&fetcher));

        let err = use_case
            .execute(&params(&[("min_length", "9"), ("max_length", "2")]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServeQuoteError::InvalidParameter("max_length must not be less than min_length".into())
        );
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unmatched_length_is_not_found() {
        let use_case = use_case(Arc::new(OfflineFetcher::default()));

        let err = use_case
            .execute(&params(&[("min_length", "25")]))
            .await
            .unwrap_err();

        // min 25 against the default max of 30 is valid, but no quote fits
        assert_eq!(
            err,
            ServeQuoteError::NotFound("no quote matches length constraints".into())
        );
    }
}
