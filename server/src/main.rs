//! Rategraph Server Binary
//!
//! Serves the currency converter over HTTP.

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rategraph_server::{ConverterServer, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env();

    // Initialize logging
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting rategraph server");

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    info!(
        listen_addr = %config.listen_addr,
        listen_port = config.listen_port,
        use_cache = config.engine.use_cache,
        consistent_reads = config.engine.consistent_reads,
        "Configuration loaded"
    );

    let server = ConverterServer::new(config);
    let stats = server.run(shutdown_signal()).await?;

    info!(
        generation = stats.generation,
        resolutions = stats.resolutions,
        cache_hits = stats.cache.hits,
        cache_misses = stats.cache.misses,
        "Shutdown complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
