//! FX engine error types.

use rategraph_common::{Currency, CurrencyPair};
use thiserror::Error;

/// Errors that can occur in the FX engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// Currency has no configured rates.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(Currency),

    /// Both currencies are known but no chain of rates connects them.
    #[error("Conversion path not found for {0}")]
    ConversionPathNotFound(CurrencyPair),

    /// Configured rate is zero, negative or not finite.
    #[error("Invalid rate {rate} for {pair}")]
    InvalidRate { pair: CurrencyPair, rate: f64 },
}

impl FxError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::CurrencyNotFound(_) => "CURRENCY_NOT_FOUND",
            FxError::ConversionPathNotFound(_) => "CONVERSION_PATH_NOT_FOUND",
            FxError::InvalidRate { .. } => "INVALID_RATE",
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
