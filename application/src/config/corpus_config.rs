//! Corpus resolution parameters.
//!
//! [`CorpusConfig`] is passed explicitly into
//! [`ResolveCorpusUseCase`](crate::use_cases::resolve_corpus::ResolveCorpusUseCase);
//! nothing in the resolver reads process-wide state.

use hitokoto_domain::DEFAULT_CATEGORY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default remote the bundled categories are refreshed from
pub const DEFAULT_REMOTE_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/hitokoto-osc/sentences-bundle@master/sentences/";

/// Corpus resolution control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Raw corpus source setting (JSON array of URLs or object of key -> URL)
    pub source: Option<String>,
    /// Base URL used when `source` is absent or unusable
    pub remote_base_url: String,
    /// Category used when explicit category filtering matches nothing
    pub default_category: String,
    /// How long a resolved corpus is reused; `None` resolves per request
    pub cache_ttl: Option<Duration>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source: None,
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            cache_ttl: None,
        }
    }
}

impl CorpusConfig {
    // ==================== Builder Methods ====================

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_remote_base_url(mut self, url: impl Into<String>) -> Self {
        self.remote_base_url = url.into();
        self
    }

    pub fn with_default_category(mut self, key: impl Into<String>) -> Self {
        self.default_category = key.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl.filter(|d| !d.is_zero());
        self
    }
}
