//! Infrastructure layer for hitokoto
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, local bundle loading, and configuration
//! file loading.

pub mod bundle;
pub mod config;
pub mod remote;

// Re-export commonly used types
pub use bundle::{BundleError, BundleLoader};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCharset, FileConfig, FileCorpusConfig,
    FileServerConfig,
};
pub use remote::HttpCorpusFetcher;
