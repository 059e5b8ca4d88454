//! Rategraph Server
//!
//! HTTP surface for the currency converter. Receives rate configuration,
//! dispatches conversions to the engine and turns engine errors into
//! client error responses.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{LogFormat, ServerConfig};
pub use error::ServerError;
pub use routes::create_router;
pub use server::ConverterServer;
pub use state::AppState;
