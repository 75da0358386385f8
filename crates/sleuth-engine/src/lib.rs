//! Sleuth Engine - lookup orchestration and failure classification.
//!
//! Every tool runs the same sequence: resolve the provider credential,
//! validate the raw input, make exactly one provider call, and classify any
//! failure into a displayable [`LookupResult`]. Entry points never panic and
//! never return an error.
//!
//! # Features
//!
//! - One async entry point per tool plus a JSON [`LookupEngine::dispatch`]
//! - Classification precedence: configuration, validation, transport,
//!   provider, malformed response, unexpected
//! - Provider panics are caught and reported as unexpected failures
//! - Credential values are scrubbed from failure text
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuth_engine::LookupEngine;
//! use sleuth_core::ToolKind;
//! use serde_json::json;
//!
//! let engine = LookupEngine::from_env()?;
//! let result = engine
//!     .dispatch(ToolKind::CellLookup, json!({"mnc": "02", "lac": 12345, "cellId": 6789}))
//!     .await;
//! if result["success"] == true {
//!     println!("{}", result["data"]["mapUrl"]);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classifier;
pub mod engine;
pub mod error;
mod pipeline;

// Re-export commonly used types
pub use classifier::{classify, provider_label, tool_label};
pub use engine::LookupEngine;
pub use error::{EngineError, Result};
pub use sleuth_core::{Failure, FailureCategory, LookupResult, ToolKind};
