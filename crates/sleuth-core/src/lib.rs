//! Sleuth Core - Foundation crate for the Sleuth OSINT lookup hub.
//!
//! This crate provides the data model every lookup tool shares, the internal
//! error taxonomy, credential handling and configuration management that the
//! other Sleuth crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Internal failure taxonomy using thiserror
//! - [`result`] - The discriminated [`LookupResult`] handed to the presentation layer
//! - [`types`] - Normalized payloads (`MatchItem`, `GeoFix`, per-tool outcomes)
//! - [`credential`] - Opaque provider secrets with placeholder detection
//! - [`config`] - TOML-based configuration with XDG paths
//!
//! # Example
//!
//! ```rust
//! use sleuth_core::{ApiKey, CredentialError, GeoFix};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Placeholder keys never reach a provider
//! let key = ApiKey::resolve(Some("your_api_key_here"));
//! assert!(matches!(key, Err(CredentialError::Placeholder)));
//!
//! let fix = GeoFix::new(23.8103, 90.4125, Some(1500.0))?;
//! assert_eq!(fix.map_url, "https://www.google.com/maps?q=23.8103,90.4125");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod credential;
pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, CellBackendKind, CellConfig, HttpConfig, LimitsConfig, ProviderEndpoints,
};
pub use credential::{ApiKey, CredentialError, CredentialSlot, Credentials};
pub use error::{
    ConfigError, ConfigResult, CoordinateRangeError, LookupError, ProviderFailureKind, Result,
    ValidationError,
};
pub use result::{Failure, FailureCategory, LookupResult};
pub use types::{
    CallerIdOutcome, FaceSearchOutcome, GeoFix, MatchItem, PersonProfile, PersonSearchOutcome,
    Radio, ToolKind, VisualMatchOutcome,
};
