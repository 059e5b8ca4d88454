//! Shared application state.

use std::sync::Arc;

use rategraph_fx::{FxEngine, FxEngineConfig};

use crate::metrics::Metrics;

/// State handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The one engine instance for the process.
    pub engine: Arc<FxEngine>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wrap an existing engine.
    pub fn new(engine: Arc<FxEngine>) -> Self {
        Self {
            engine,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Build state around a fresh engine.
    pub fn with_config(config: FxEngineConfig) -> Self {
        Self::new(Arc::new(FxEngine::new(config)))
    }
}
