//! Raw configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default, so an empty file is a valid configuration.

use hitokoto_application::{CorpusConfig, DEFAULT_REMOTE_BASE_URL};
use hitokoto_domain::DEFAULT_CATEGORY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Default local bundle directory
pub const DEFAULT_BUNDLE_DIR: &str = "sentences";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("corpus.default_category cannot be empty")]
    EmptyDefaultCategory,

    #[error("corpus.remote_base_url cannot be empty")]
    EmptyRemoteBaseUrl,

    #[error("corpus.fetch_timeout_seconds cannot be 0")]
    InvalidFetchTimeout,

    #[error("server.bind cannot be empty")]
    EmptyBind,
}

/// Corpus source setting as written in config
///
/// Deployments set it as a JSON string (the `CHARSET` variable); config files
/// may use a native array or table instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileCharset {
    /// Raw JSON text, interpreted by the resolver
    Raw(String),
    /// List of category URLs
    Urls(Vec<String>),
    /// Category key -> URL
    Mapping(BTreeMap<String, String>),
    /// Any other value; the resolver rejects it and uses the default remote
    Other(serde_json::Value),
}

impl FileCharset {
    /// JSON text the resolver understands
    pub fn to_source_string(&self) -> String {
        match self {
            FileCharset::Raw(raw) => raw.clone(),
            FileCharset::Urls(urls) => serde_json::Value::from(urls.clone()).to_string(),
            FileCharset::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v.as_str())))
                    .collect(),
            )
            .to_string(),
            FileCharset::Other(value) => value.to_string(),
        }
    }
}

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address to listen on (host:port)
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Raw corpus configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Where categories are fetched from (absent = default remote)
    pub charset: Option<FileCharset>,
    /// Directory holding the local `<key>.json` bundle
    pub bundle_dir: PathBuf,
    /// Remote used when `charset` is absent or unusable
    pub remote_base_url: String,
    /// Fallback category for unmatched category filters
    pub default_category: String,
    /// Per-request timeout for remote fetches
    pub fetch_timeout_seconds: Option<u64>,
    /// Reuse a resolved corpus this long (0 = resolve per request)
    pub cache_ttl_seconds: u64,
    /// Seed for quote selection (absent = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            charset: None,
            bundle_dir: PathBuf::from(DEFAULT_BUNDLE_DIR),
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            fetch_timeout_seconds: None,
            cache_ttl_seconds: 0,
            seed: None,
        }
    }
}

impl FileCorpusConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_seconds.map(Duration::from_secs)
    }

    /// Convert into the resolver's configuration
    pub fn to_corpus_config(&self) -> CorpusConfig {
        let mut config = CorpusConfig::default()
            .with_remote_base_url(self.remote_base_url.clone())
            .with_default_category(self.default_category.clone())
            .with_cache_ttl(Some(Duration::from_secs(self.cache_ttl_seconds)));
        if let Some(charset) = &self.charset {
            config = config.with_source(charset.to_source_string());
        }
        config
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Server settings
    pub server: FileServerConfig,
    /// Corpus settings
    pub corpus: FileCorpusConfig,
    /// Expose internal error messages to callers
    pub debug: bool,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBind);
        }

        if self.corpus.default_category.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDefaultCategory);
        }

        if self.corpus.remote_base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyRemoteBaseUrl);
        }

        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.corpus.fetch_timeout_seconds {
            return Err(ConfigValidationError::InvalidFetchTimeout);
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
