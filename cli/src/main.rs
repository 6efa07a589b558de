//! CLI entrypoint for the hitokoto server
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hitokoto_application::{ResolveCorpusUseCase, ServeQuoteUseCase};
use hitokoto_infrastructure::{BundleLoader, ConfigLoader, FileConfig, HttpCorpusFetcher};
use hitokoto_presentation::{AppState, Cli, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        let config = load_config(&cli)?;
        println!();
        println!("Effective configuration:");
        print!("{}", config.to_toml().context("Failed to render configuration")?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    info!("Starting hitokoto");

    // === Dependency Injection ===
    let local = BundleLoader::new(&config.corpus.bundle_dir)
        .load()
        .context("Failed to load local bundle")?;

    let fetcher = Arc::new(
        HttpCorpusFetcher::new(config.corpus.fetch_timeout())
            .context("Failed to build HTTP client")?,
    );

    let resolver = Arc::new(ResolveCorpusUseCase::new(
        fetcher,
        Arc::new(local),
        config.corpus.to_corpus_config(),
    ));

    let mut service = ServeQuoteUseCase::new(resolver);
    if let Some(seed) = config.corpus.seed {
        service = service.with_seed(seed);
    }

    let app = router(AppState::new(Arc::new(service)).with_debug(config.debug));

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("hitokoto listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("hitokoto stopped");
    Ok(())
}

/// Merge config sources, then apply command line overrides
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(dir) = &cli.bundle_dir {
        config.corpus.bundle_dir = dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.corpus.seed = Some(seed);
    }
    config.debug |= cli.debug;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
