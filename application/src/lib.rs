//! Application layer for hitokoto
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CorpusConfig, DEFAULT_REMOTE_BASE_URL};
pub use ports::corpus_fetcher::{CorpusFetcher, FetchError};
pub use use_cases::resolve_corpus::ResolveCorpusUseCase;
pub use use_cases::serve_quote::{QuoteSelection, ServeQuoteError, ServeQuoteUseCase};
