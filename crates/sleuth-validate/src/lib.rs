//! Sleuth Validate - input schemas for every lookup tool.
//!
//! Each tool has one schema that turns raw presentation-layer input into a
//! typed, validated query. Validation is pure and synchronous: it performs no
//! I/O and either returns the query or a [`ValidationError`] listing every
//! violated rule.
//!
//! Validated query types have private fields and can only be built through
//! these schemas, so provider adapters never need to re-validate.
//!
//! # Example
//!
//! ```rust
//! use sleuth_validate::{validate_cell_lookup, RawCellLookup, ValidationContext};
//!
//! let raw = RawCellLookup {
//!     mnc: Some("02".into()),
//!     lac: Some("12345".into()),
//!     cell_id: Some("6789".into()),
//!     ..RawCellLookup::default()
//! };
//! let query = validate_cell_lookup(&raw, &ValidationContext::default()).unwrap();
//! assert_eq!(query.mcc(), "470");
//! assert_eq!(query.lac(), 12345);
//! ```
//!
//! [`ValidationError`]: sleuth_core::ValidationError

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod image;
pub mod raw;
mod rules;
pub mod schemas;

// Re-export commonly used types
pub use image::{parse_image_reference, ImageSource, ImageUpload};
pub use raw::{RawCallerId, RawCellLookup, RawFaceSearch, RawPersonSearch, RawVisualMatch};
pub use schemas::{
    validate_caller_id, validate_cell_lookup, validate_face_search, validate_person_search,
    validate_visual_match, CallerIdQuery, CellQuery, FaceQuery, PersonQuery, ValidationContext,
    VisualQuery,
};
