//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the hitokoto server
#[derive(Parser, Debug)]
#[command(name = "hitokoto")]
#[command(author, version, about = "Serve one random hitokoto per HTTP request")]
#[command(long_about = r#"
hitokoto serves a single random quotation per request, drawn from a
categorized corpus. Categories are fetched from a remote source on each
request and fall back to the local bundle one category at a time.

Query parameters:
  c           Comma separated category keys (e.g. c=a,b)
  encode      json (default), text or js
  callback    Function name the payload is passed to
  select      DOM selector for encode=js (default .hitokoto)
  min_length  Inclusive minimum quote length
  max_length  Inclusive maximum quote length (default 30)

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./hitokoto.toml     Project-level config
3. ~/.config/hitokoto/config.toml   Global config

Environment overrides use the HITOKOTO_ prefix (HITOKOTO_CORPUS__CHARSET=...).
The deployment variables CHARSET and DEV_ENV are honoured as well.

Example:
  hitokoto --bind 0.0.0.0:8787 --bundle-dir ./sentences
  curl 'http://127.0.0.1:8787/?c=a,b&encode=text'
"#)]
pub struct Cli {
    /// Address to listen on (host:port)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Directory holding the local <key>.json bundle
    #[arg(long, value_name = "DIR")]
    pub bundle_dir: Option<PathBuf>,

    /// Expose internal error messages in 500 responses
    #[arg(long)]
    pub debug: bool,

    /// Seed quote selection for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
