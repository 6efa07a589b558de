//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod resolve_corpus;
pub mod serve_quote;
