//! Presentation layer for hitokoto
//!
//! This crate contains CLI definitions, the HTTP router, response
//! rendering and the uniform error envelope.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{AppState, ErrorEnvelope, RenderedQuote, render, router};
