//! Server lifecycle.

use std::future::Future;

use axum::Router;
use rategraph_fx::FxEngineStats;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::routes::create_router;
use crate::state::AppState;

/// The currency converter HTTP server.
#[derive(Debug, Clone)]
pub struct ConverterServer {
    config: ServerConfig,
    state: AppState,
}

impl ConverterServer {
    /// Create a server with a fresh, empty engine.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::with_config(config.engine.clone());
        Self { config, state }
    }

    /// Build the router over this server's state.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.socket_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::bind(addr.to_string(), e))
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<FxEngineStats>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    /// Returns the final engine statistics.
    #[instrument(skip_all)]
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<FxEngineStats>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        info!(%local_addr, "Currency converter listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        let stats = self.state.engine.stats();
        info!(
            resolutions = stats.resolutions,
            cache_hits = stats.cache.hits,
            cache_hit_ratio = stats.cache.hit_ratio(),
            "Currency converter stopped"
        );
        Ok(stats)
    }
}
