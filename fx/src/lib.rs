//! Rategraph FX Engine
//!
//! Converts amounts between currencies from a sparse set of configured
//! rates. Rates that were never configured directly are derived by a
//! breadth-first search over the rate graph and memoized until the next
//! configuration change.
//!
//! # Example
//!
//! ```rust
//! use rategraph_common::{Currency, DirectRate};
//! use rategraph_fx::FxEngine;
//!
//! let engine = FxEngine::default();
//! engine
//!     .configure(&[
//!         DirectRate::new("USD", "EUR", 0.5),
//!         DirectRate::new("EUR", "GBP", 0.8),
//!     ])
//!     .unwrap();
//!
//! let gbp = engine
//!     .convert(&Currency::usd(), &Currency::gbp(), 100.0)
//!     .unwrap();
//! assert!((gbp - 40.0).abs() < 1e-9);
//! ```

pub mod cache;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod graph;
pub mod resolver;

pub use cache::{CacheStats, RateCache};
pub use conversion::{Conversion, ConversionRequest, RateSource};
pub use engine::{FxEngine, FxEngineConfig, FxEngineStats};
pub use error::{FxError, FxResult};
pub use graph::RateGraph;
