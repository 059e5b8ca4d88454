//! Server error types.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rategraph_fx::FxError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Conversion engine rejected the request.
    #[error(transparent)]
    Fx(#[from] FxError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to address {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    /// Create a bind error from an address string and IO error.
    pub fn bind(address: impl Into<String>, source: io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Fx(e) => e.error_code(),
            ServerError::InvalidRequest(_) => "INVALID_REQUEST",
            ServerError::InvalidAddress(_) => "INVALID_ADDRESS",
            ServerError::BindError { .. } => "BIND_ERROR",
            ServerError::Io(_) => "IO_ERROR",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Fx(_) | ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rategraph_common::Currency;

    #[test]
    fn test_fx_errors_are_client_errors() {
        let err = ServerError::from(FxError::CurrencyNotFound(Currency::new("XXX")));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "CURRENCY_NOT_FOUND");
        assert_eq!(err.to_string(), "Currency not found: XXX");
    }

    #[test]
    fn test_server_errors_are_internal() {
        let err = ServerError::bind("127.0.0.1:1", io::Error::from(io::ErrorKind::AddrInUse));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "BIND_ERROR");
    }
}
