use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{
    load_config, validate_config, DataLoader, GoogleSheetsSource, TableOptions, TabularSource,
};
use marquee_server::api::create_router;
use marquee_server::state::AppState;

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MARQUEE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Spreadsheet: {}", config.source.spreadsheet_id);
    if config.source.api_key.is_none() {
        warn!("No API key configured; the catalog will report a data source error");
    }

    // Create the record source and the shared loader
    let source: Arc<dyn TabularSource> = Arc::new(
        GoogleSheetsSource::new(config.source.clone())
            .context("Failed to create spreadsheet client")?,
    );
    let loader = Arc::new(DataLoader::new(
        source,
        TableOptions {
            id_column: config.catalog.id_column.clone(),
        },
        Duration::from_secs(config.catalog.cache_ttl_secs),
    ));

    // Warm the cache; failures are served as notices, not fatal
    let loaded = loader.load().await;
    match &loaded.error {
        Some(e) => warn!("Initial catalog load failed: {}", e),
        None => info!(
            "Catalog loaded: {} records ({} with covers)",
            loaded.table.len(),
            loaded.table.catalog_len()
        ),
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), loader));

    // Sweep idle sessions in the background
    let sweeper = {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let dropped = state.sessions().prune_idle(Instant::now()).await;
                debug!("Session sweep dropped {} sessions", dropped);
            }
        })
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    sweeper.abort();

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
