//! Provider adapter implementations.

pub mod caller_id;
pub mod common;
pub mod facecheck;
pub mod geo;
pub mod opencellid;
pub mod people_data_labs;
pub mod unwiredlabs;
pub mod visual_match;

pub use caller_id::CallerIdAdapter;
pub use facecheck::FaceCheckAdapter;
pub use geo::GeoBackend;
pub use opencellid::OpenCellIdAdapter;
pub use people_data_labs::PeopleDataLabsAdapter;
pub use unwiredlabs::UnwiredLabsAdapter;
pub use visual_match::VisualMatchAdapter;
