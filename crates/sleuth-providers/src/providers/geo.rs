//! Cell-tower geolocation backend selection.

use super::opencellid::OpenCellIdAdapter;
use super::unwiredlabs::UnwiredLabsAdapter;
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use sleuth_core::{
    ApiKey, CellBackendKind, CredentialSlot, GeoFix, LookupError, ProviderEndpoints,
    ProviderFailureKind, Result,
};
use sleuth_validate::CellQuery;

/// The configured geolocation provider for the cell lookup tool.
#[derive(Debug, Clone)]
pub enum GeoBackend {
    /// opencellid.org
    OpenCellId(OpenCellIdAdapter),
    /// unwiredlabs.com
    UnwiredLabs(UnwiredLabsAdapter),
}

impl GeoBackend {
    /// Build the backend named by configuration.
    #[must_use]
    pub fn from_config(kind: CellBackendKind, endpoints: &ProviderEndpoints) -> Self {
        match kind {
            CellBackendKind::OpenCellId => {
                Self::OpenCellId(OpenCellIdAdapter::new(&endpoints.opencellid_url))
            }
            CellBackendKind::UnwiredLabs => {
                Self::UnwiredLabs(UnwiredLabsAdapter::new(&endpoints.unwiredlabs_url))
            }
        }
    }
}

impl ProviderAdapter for GeoBackend {
    type Query = CellQuery;
    type Output = GeoFix;

    fn provider_id(&self) -> &'static str {
        match self {
            Self::OpenCellId(a) => a.provider_id(),
            Self::UnwiredLabs(a) => a.provider_id(),
        }
    }

    fn credential_slot(&self) -> CredentialSlot {
        match self {
            Self::OpenCellId(a) => a.credential_slot(),
            Self::UnwiredLabs(a) => a.credential_slot(),
        }
    }

    fn build_request(&self, query: &CellQuery, key: &ApiKey) -> Result<HttpRequest> {
        match self {
            Self::OpenCellId(a) => a.build_request(query, key),
            Self::UnwiredLabs(a) => a.build_request(query, key),
        }
    }

    fn parse_response(&self, query: &CellQuery, response: &HttpResponse) -> Result<GeoFix> {
        match self {
            Self::OpenCellId(a) => a.parse_response(query, response),
            Self::UnwiredLabs(a) => a.parse_response(query, response),
        }
    }
}

/// Turn parsed coordinates into a fix.
///
/// A body that looks successful but lacks either coordinate is a "no data for
/// this cell" failure, never a success with null coordinates.
pub(crate) fn fix_from_coordinates(
    provider: &'static str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: Option<f64>,
) -> Result<GeoFix> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(LookupError::Provider {
            provider,
            status: None,
            kind: ProviderFailureKind::NoMatch,
            message: "response contains no coordinates".to_string(),
        });
    };

    GeoFix::new(latitude, longitude, accuracy)
        .map_err(|e| LookupError::malformed(provider, e.to_string()))
}
