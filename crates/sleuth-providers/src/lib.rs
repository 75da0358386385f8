//! Sleuth Providers - adapters for the external lookup services.
//!
//! Each adapter turns one validated query into exactly one outbound HTTP
//! request and maps the provider's raw response into the tool's normalized
//! payload. Adapters never retry and never format user-facing text; failures
//! are returned as [`LookupError`](sleuth_core::LookupError) for the
//! orchestration layer to classify.
//!
//! # Features
//!
//! - **Transport seam**: adapters talk to an [`HttpTransport`], so tests can
//!   swap in a [`MockTransport`] and inspect every outbound request
//! - **One call per lookup**: [`ProviderAdapter::execute`] builds, sends and
//!   parses exactly once
//! - **Tolerant parsing**: optional provider fields become `None`, missing
//!   required fields become malformed-response errors
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuth_providers::{OpenCellIdAdapter, ProviderAdapter, ReqwestTransport};
//!
//! let transport = ReqwestTransport::new(&config.http)?;
//! let adapter = OpenCellIdAdapter::new(&config.providers.opencellid_url);
//! let fix = adapter.execute(&transport, &query, &key).await?;
//! println!("{}", fix.map_url);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod adapter;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod providers;
pub mod transport;

// Re-export commonly used types
pub use adapter::ProviderAdapter;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockReply, MockTransport};
pub use providers::{
    CallerIdAdapter, FaceCheckAdapter, GeoBackend, OpenCellIdAdapter, PeopleDataLabsAdapter,
    UnwiredLabsAdapter, VisualMatchAdapter,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartPart, RequestBody,
    ReqwestTransport, TransportError,
};
