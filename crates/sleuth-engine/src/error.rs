//! Error types for engine construction.
//!
//! Lookups themselves never fail with these; they resolve to a
//! [`LookupResult`](sleuth_core::LookupResult). These only cover building the
//! engine from configuration.

use sleuth_core::ConfigError;
use sleuth_providers::TransportError;
use thiserror::Error;

/// Engine construction failures.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration file could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be created
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

/// Result type alias for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;
