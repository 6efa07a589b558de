//! Resolve Corpus use case
//!
//! Materializes the effective corpus from the configured sources, falling
//! back to the local bundle one category at a time.

use crate::config::CorpusConfig;
use crate::ports::corpus_fetcher::CorpusFetcher;
use hitokoto_domain::{Corpus, CorpusSource, QuoteRecord, SourceEntry};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

struct CachedCorpus {
    resolved_at: Instant,
    corpus: Arc<Corpus>,
}

/// Use case for resolving the corpus a request selects from
///
/// Never fails: every fetch error is absorbed by substituting the bundled
/// copy of that category. A category with neither is left out.
pub struct ResolveCorpusUseCase<F: CorpusFetcher + 'static> {
    fetcher: Arc<F>,
    local: Arc<Corpus>,
    config: CorpusConfig,
    cache: RwLock<Option<CachedCorpus>>,
}

impl<F: CorpusFetcher + 'static> ResolveCorpusUseCase<F> {
    pub fn new(fetcher: Arc<F>, local: Arc<Corpus>, config: CorpusConfig) -> Self {
        Self {
            fetcher,
            local,
            config,
            cache: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn local(&self) -> &Corpus {
        &self.local
    }

    /// Resolve the corpus, reusing a cached one while it is fresh
    pub async fn execute(&self) -> Arc<Corpus> {
        let Some(ttl) = self.config.cache_ttl else {
            return Arc::new(self.resolve().await);
        };

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.resolved_at.elapsed() < ttl {
                debug!("Serving cached corpus");
                return Arc::clone(&cached.corpus);
            }
        }

        let corpus = Arc::new(self.resolve().await);
        *self.cache.write().await = Some(CachedCorpus {
            resolved_at: Instant::now(),
            corpus: Arc::clone(&corpus),
        });
        corpus
    }

    /// Resolve a fresh corpus, ignoring the cache
    pub async fn resolve(&self) -> Corpus {
        let source = match CorpusSource::parse(self.config.source.as_deref()) {
            Ok(source) => source,
            Err(e) => {
                warn!("Ignoring corpus source setting, using default remote: {}", e);
                CorpusSource::Default
            }
        };

        let entries = source.entries(self.local.keys(), &self.config.remote_base_url);
        info!(
            "Resolving {} categories ({})",
            entries.len(),
            if source.is_default() { "default remote" } else { "configured sources" }
        );

        let fetched = self.fetch_all(&entries).await;

        // Later entries win on duplicate keys
        let corpus: Corpus = entries
            .into_iter()
            .zip(fetched)
            .filter_map(|(entry, result)| {
                let quotes = result.or_else(|| self.fallback(&entry.key))?;
                Some((entry.key, quotes))
            })
            .collect();

        info!(
            "Resolved corpus: {} categories, {} quotes",
            corpus.len(),
            corpus.quote_count()
        );
        corpus
    }

    /// Fetch every entry concurrently; `None` marks a failed entry
    async fn fetch_all(&self, entries: &[SourceEntry]) -> Vec<Option<Vec<QuoteRecord>>> {
        let mut join_set = JoinSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let entry = entry.clone();

            join_set.spawn(async move {
                let result = fetcher.fetch_category(&entry.url).await;
                (index, entry, result)
            });
        }

        let mut results = vec![None; entries.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, entry, Ok(quotes))) => {
                    debug!(
                        "Fetched category '{}' ({} quotes) from {}",
                        entry.key,
                        quotes.len(),
                        entry.url
                    );
                    results[index] = Some(quotes);
                }
                Ok((_, entry, Err(e))) => {
                    warn!(
                        "Fetch of category '{}' from {} failed, using local copy: {}",
                        entry.key, entry.url, e
                    );
                }
                Err(e) => {
                    warn!("Fetch task join error: {}", e);
                }
            }
        }

        results
    }

    fn fallback(&self, key: &str) -> Option<Vec<QuoteRecord>> {
        let quotes = self.local.get(key).map(<[QuoteRecord]>::to_vec);
        if quotes.is_none() {
            debug!("No local copy of category '{}', omitting it", key);
        }
        quotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::corpus_fetcher::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "https://cdn.test/sentences/";

    /// Fetcher answering from a fixed URL table; unknown URLs fail
    #[derive(Default)]
    struct TableFetcher {
        responses: HashMap<String, Result<Vec<QuoteRecord>, FetchError>>,
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl TableFetcher {
        fn with(mut self, url: &str, response: Result<Vec<QuoteRecord>, FetchError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        fn with_delay(mut self, url: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self
        }

        fn calls(&self) -> Vec<String> {
            let mut calls = self.calls.lock().unwrap().clone();
            calls.sort();
            calls
        }
    }

    #[async_trait]
    impl CorpusFetcher for TableFetcher {
        async fn fetch_category(&self, url: &str) -> Result<Vec<QuoteRecord>, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::Status(404)))
        }
    }

    fn quote(kind: &str, text: &str) -> QuoteRecord {
        QuoteRecord::new(1, format!("{}-{}", kind, text), text).with_kind(kind)
    }

    fn local() -> Arc<Corpus> {
        Arc::new(
            Corpus::new()
                .with_category("a", vec![quote("a", "local a")])
                .with_category("b", vec![quote("b", "local b")]),
        )
    }

    fn config() -> CorpusConfig {
        CorpusConfig::default().with_remote_base_url(BASE)
    }

    fn texts(corpus: &Corpus, key: &str) -> Vec<String> {
        corpus
            .get(key)
            .unwrap_or_default()
            .iter()
            .map(|q| q.hitokoto.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_default_source_fetches_every_local_key() {
        let fetcher = TableFetcher::default()
            .with(&format!("{}a.json", BASE), Ok(vec![quote("a", "remote a")]))
            .with(&format!("{}b.json", BASE), Ok(vec![quote("b", "remote b")]));
        let fetcher = Arc::new(fetcher);
        let use_case = ResolveCorpusUseCase::new(Arc::clone(&fetcher), local(), config());

        let corpus = use_case.resolve().await;

        assert_eq!(texts(&corpus, "a"), vec!["remote a"]);
        assert_eq!(texts(&corpus, "b"), vec!["remote b"]);
        assert_eq!(
            fetcher.calls(),
            vec![format!("{}a.json", BASE), format!("{}b.json", BASE)]
        );
    }

    #[tokio::test]
    async fn test_failed_category_falls_back_alone() {
        let fetcher = TableFetcher::default()
            .with(&format!("{}a.json", BASE), Ok(vec![quote("a", "remote a")]))
            .with(&format!("{}b.json", BASE), Err(FetchError::Status(503)));
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config());

        let corpus = use_case.resolve().await;

        assert_eq!(texts(&corpus, "a"), vec!["remote a"]);
        assert_eq!(texts(&corpus, "b"), vec!["local b"]);
    }

    #[tokio::test]
    async fn test_decode_failure_falls_back() {
        let fetcher = TableFetcher::default()
            .with(&format!("{}a.json", BASE), Err(FetchError::Decode("bad".into())));
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config());

        let corpus = use_case.resolve().await;

        assert_eq!(texts(&corpus, "a"), vec!["local a"]);
        assert_eq!(texts(&corpus, "b"), vec!["local b"]);
    }

    #[tokio::test]
    async fn test_url_list_source() {
        let fetcher = TableFetcher::default()
            .with("https://mirror.test/x/c.json", Ok(vec![quote("c", "remote c")]));
        let config = config().with_source(
            r#"["https://mirror.test/x/c.json", "https://mirror.test/x/b.json", "https://mirror.test/x/q.json"]"#,
        );
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config);

        let corpus = use_case.resolve().await;

        assert_eq!(corpus.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(texts(&corpus, "c"), vec!["remote c"]);
        assert_eq!(texts(&corpus, "b"), vec!["local b"]);
    }

    #[tokio::test]
    async fn test_mapping_source() {
        let fetcher = TableFetcher::default()
            .with("https://mirror.test/anything", Ok(vec![quote("z", "remote z")]));
        let config = config().with_source(r#"{"z": "https://mirror.test/anything"}"#);
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config);

        let corpus = use_case.resolve().await;

        assert_eq!(corpus.keys().collect::<Vec<_>>(), vec!["z"]);
        assert_eq!(texts(&corpus, "z"), vec!["remote z"]);
    }

    #[tokio::test]
    async fn test_invalid_source_falls_back_to_default_remote() {
        let fetcher = TableFetcher::default()
            .with(&format!("{}a.json", BASE), Ok(vec![quote("a", "remote a")]));
        let fetcher = Arc::new(fetcher);
        let config = config().with_source("42");
        let use_case = ResolveCorpusUseCase::new(Arc::clone(&fetcher), local(), config);

        let corpus = use_case.resolve().await;

        assert_eq!(texts(&corpus, "a"), vec!["remote a"]);
        assert_eq!(texts(&corpus, "b"), vec!["local b"]);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_keys_last_wins() {
        let fetcher = TableFetcher::default()
            .with("https://one.test/a.json", Ok(vec![quote("a", "first")]))
            .with("https://two.test/a.json", Ok(vec![quote("a", "second")]))
            .with_delay("https://two.test/a.json", Duration::from_millis(20));
        let config = config().with_source(r#"["https://one.test/a.json", "https://two.test/a.json"]"#);
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config);

        let corpus = use_case.resolve().await;

        assert_eq!(texts(&corpus, "a"), vec!["second"]);
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let slow = Duration::from_millis(200);
        let fetcher = TableFetcher::default()
            .with(&format!("{}a.json", BASE), Ok(vec![quote("a", "remote a")]))
            .with(&format!("{}b.json", BASE), Ok(vec![quote("b", "remote b")]))
            .with_delay(&format!("{}a.json", BASE), slow)
            .with_delay(&format!("{}b.json", BASE), slow);
        let use_case = ResolveCorpusUseCase::new(Arc::new(fetcher), local(), config());

        let started = Instant::now();
        let corpus = use_case.resolve().await;

        assert!(started.elapsed() < slow * 2);
        assert_eq!(corpus.len(), 2);
    }

    #[tokio::test]
    async fn test_cache_reuses_corpus_until_expiry() {
        let fetcher = Arc::new(TableFetcher::default());
        let config = config().with_cache_ttl(Some(Duration::from_secs(3600)));
        let use_case = ResolveCorpusUseCase::new(Arc::clone(&fetcher), local(), config);

        let first = use_case.execute().await;
        let second = use_case.execute().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_without_cache_resolves_every_time() {
        let fetcher = Arc::new(TableFetcher::default());
        let use_case = ResolveCorpusUseCase::new(Arc::clone(&fetcher), local(), config());

        use_case.execute().await;
        use_case.execute().await;

        assert_eq!(fetcher.calls().len(), 4);
    }
}
