//! Configuration file loading for hitokoto
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HITOKOTO_*` environment variables
//! 2. Legacy deployment variables `CHARSET` and `DEV_ENV`
//! 3. `--config <path>` specified file
//! 4. Project root: `./hitokoto.toml` or `./.hitokoto.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/hitokoto/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BIND, DEFAULT_BUNDLE_DIR, FileCharset, FileConfig,
    FileCorpusConfig, FileServerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, LEGACY_CHARSET_VAR, LEGACY_DEBUG_VAR};
