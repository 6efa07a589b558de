//! Configuration loader with multi-source merging

use super::file_config::{FileCharset, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Prefix for environment overrides (`HITOKOTO_CORPUS__CHARSET`, ...)
pub const ENV_PREFIX: &str = "HITOKOTO_";

/// Deployment variable holding the corpus source JSON
pub const LEGACY_CHARSET_VAR: &str = "CHARSET";

/// Deployment variable enabling internal error messages when `"true"`
pub const LEGACY_DEBUG_VAR: &str = "DEV_ENV";

const PROJECT_FILES: [&str; 2] = ["hitokoto.toml", ".hitokoto.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `HITOKOTO_*` environment variables (`__` separates sections)
    /// 2. Legacy `CHARSET` / `DEV_ENV` variables
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./hitokoto.toml` or `./.hitokoto.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/hitokoto/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Build the merged figment without extracting it
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        Self::env_layers(Self::file_figment(config_path))
    }

    /// Load only default configuration and environment (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(Self::load_defaults()));
        Self::env_layers(figment).extract().map_err(Box::new)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Legacy deployment variables, then `HITOKOTO_*` overrides
    fn env_layers(mut figment: Figment) -> Figment {
        // Kept verbatim so the resolver decides whether it is usable
        if let Ok(raw) = std::env::var(LEGACY_CHARSET_VAR) {
            figment = figment.merge(Serialized::default(
                "corpus.charset",
                FileCharset::Raw(raw),
            ));
        }
        if let Ok(value) = std::env::var(LEGACY_DEBUG_VAR) {
            figment = figment.merge(Serialized::default("debug", value == "true"));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn file_figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::load_defaults()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/hitokoto/config.toml if set,
    /// otherwise falls back to ~/.config/hitokoto/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hitokoto").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* variables", ENV_PREFIX);
        println!("  [ENV  ] {} / {}", LEGACY_CHARSET_VAR, LEGACY_DEBUG_VAR);

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./hitokoto.toml or ./.hitokoto.toml");
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
