//! Corpus source configuration: where each category is fetched from.
//!
//! The raw setting is a JSON document:
//!
//! - absent: every category of the local bundle comes from the default remote
//! - `["https://host/path/a.json", ...]`: key is the file name without `.json`
//! - `{"a": "https://host/a.json", ...}`: explicit key -> URL mapping

use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Reasons a corpus source setting cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusSourceError {
    #[error("corpus source is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("corpus source must be a JSON array of URLs or a JSON object of key to URL")]
    UnsupportedShape,

    #[error("corpus source entry is not a string: {0}")]
    NonStringEntry(String),

    #[error("invalid corpus source URL '{0}'")]
    InvalidUrl(String),
}

/// One category to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    pub url: String,
}

impl SourceEntry {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

/// Parsed corpus source setting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorpusSource {
    /// Fetch every local category from the default remote
    #[default]
    Default,
    /// URL list; keys derived from file names
    Urls(Vec<SourceEntry>),
    /// Explicit key -> URL mapping
    Mapping(Vec<SourceEntry>),
}

impl CorpusSource {
    /// Parse the raw setting; `None` and blank values mean [`CorpusSource::Default`]
    pub fn parse(raw: Option<&str>) -> Result<Self, CorpusSourceError> {
        let raw = match raw.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => return Ok(CorpusSource::Default),
        };

        let value: Value =
            serde_json::from_str(raw).map_err(|e| CorpusSourceError::InvalidJson(e.to_string()))?;

        match value {
            Value::Array(items) => {
                let entries = items
                    .into_iter()
                    .map(|item| {
                        let url = expect_string(item)?;
                        let key = key_from_url(&url)?;
                        Ok(SourceEntry::new(key, url))
                    })
                    .collect::<Result<Vec<_>, CorpusSourceError>>()?;
                Ok(CorpusSource::Urls(entries))
            }
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, item)| Ok(SourceEntry::new(key, expect_string(item)?)))
                    .collect::<Result<Vec<_>, CorpusSourceError>>()?;
                Ok(CorpusSource::Mapping(entries))
            }
            _ => Err(CorpusSourceError::UnsupportedShape),
        }
    }

    /// Entries to fetch, expanding the default source over `local_keys`
    pub fn entries<'a>(
        &self,
        local_keys: impl IntoIterator<Item = &'a str>,
        remote_base: &str,
    ) -> Vec<SourceEntry> {
        match self {
            CorpusSource::Default => local_keys
                .into_iter()
                .map(|key| SourceEntry::new(key, default_remote_url(remote_base, key)))
                .collect(),
            CorpusSource::Urls(entries) | CorpusSource::Mapping(entries) => entries.clone(),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, CorpusSource::Default)
    }
}

/// `<base>/<key>.json`, tolerating a base with or without trailing slash
pub fn default_remote_url(remote_base: &str, key: &str) -> String {
    format!("{}/{}.json", remote_base.trim_end_matches('/'), key)
}

/// Category key for a URL: last path segment with a `.json` suffix removed
pub fn key_from_url(raw: &str) -> Result<String, CorpusSourceError> {
    let url = Url::parse(raw).map_err(|_| CorpusSourceError::InvalidUrl(raw.to_string()))?;
    let filename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    Ok(strip_json_suffix(filename).to_string())
}

fn strip_json_suffix(filename: &str) -> &str {
    let cut = filename.len().saturating_sub(".json".len());
    match filename.get(cut..) {
        Some(suffix) if filename.len() >= 5 && suffix.eq_ignore_ascii_case(".json") => {
            &filename[..cut]
        }
        _ => filename,
    }
}

fn expect_string(value: Value) -> Result<String, CorpusSourceError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(CorpusSourceError::NonStringEntry(other.to_string())),
    }
}
