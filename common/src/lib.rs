//! Rategraph Common Types
//!
//! Shared types used across the rategraph workspace: currency codes,
//! currency pairs, directly configured rates and conversion identifiers.

pub mod currency;
pub mod identifiers;

pub use currency::*;
pub use identifiers::*;
