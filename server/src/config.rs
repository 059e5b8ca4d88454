//! Server configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use rategraph_fx::FxEngineConfig;

use crate::error::ServerError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human readable lines.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Log level, used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Conversion engine configuration.
    pub engine: FxEngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            engine: FxEngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("RATEGRAPH_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Some(port) = lookup("RATEGRAPH_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(format) = lookup("RATEGRAPH_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                config.log_format = format;
            }
        }

        if let Some(flag) = lookup("RATEGRAPH_USE_CACHE").and_then(|v| parse_flag(&v)) {
            config.engine.use_cache = flag;
        }

        if let Some(flag) = lookup("RATEGRAPH_CONSISTENT_READS").and_then(|v| parse_flag(&v)) {
            config.engine.consistent_reads = flag;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        self.socket_addr().map(|_| ()).map_err(|e| e.to_string())
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.listen_addr, self.listen_port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
