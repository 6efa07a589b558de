//! Application-level configuration.
//!
//! - [`CorpusConfig`]: corpus source, remote fallback and cache control

pub mod corpus_config;

pub use corpus_config::{CorpusConfig, DEFAULT_REMOTE_BASE_URL};
