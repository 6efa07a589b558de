//! Domain layer for hitokoto
//!
//! This crate contains the quote entities, the request query model and the
//! selection rules. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Corpus**: category key -> ordered quotes, never mutated once built
//! - **Query**: validated request (categories, length window, output mode)
//! - **Selection**: category filtering, length filtering, then a uniform pick
//! - **CorpusSource**: where each category should be fetched from

pub mod core;
pub mod query;
pub mod quote;
pub mod selection;
pub mod source;

// Re-export commonly used types
pub use core::error::DomainError;
pub use query::{Callback, LengthBounds, OutputMode, Query, RawParams, parse_query};
pub use quote::{Corpus, DEFAULT_CATEGORY, NumberOrString, QuoteRecord};
pub use selection::select_quote;
pub use source::{CorpusSource, CorpusSourceError, SourceEntry};
