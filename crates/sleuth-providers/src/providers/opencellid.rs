//! `OpenCellID` cell-tower geolocation.

use super::common::{error_from_status, number_field, parse_json, str_field};
use super::geo::fix_from_coordinates;
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use sleuth_core::{ApiKey, CredentialSlot, GeoFix, LookupError, ProviderFailureKind, Result};
use sleuth_validate::CellQuery;

const PROVIDER: &str = "opencellid";

/// `OpenCellID` `cell/get` adapter.
///
/// Sends `GET {base}/cell/get?key&mcc&mnc&lac&cellid&radio&format=json`.
/// Success bodies carry `lat`, `lon` and `range`; failures carry `error`
/// (sometimes alongside `stat: "error"` or a numeric `code`).
#[derive(Debug, Clone)]
pub struct OpenCellIdAdapter {
    base_url: String,
}

impl OpenCellIdAdapter {
    /// Create an adapter against `base_url` (e.g. `https://opencellid.org`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ProviderAdapter for OpenCellIdAdapter {
    type Query = CellQuery;
    type Output = GeoFix;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::OpenCellId
    }

    fn build_request(&self, query: &CellQuery, key: &ApiKey) -> Result<HttpRequest> {
        Ok(HttpRequest::get(format!("{}/cell/get", self.base_url))
            .query("key", key.expose())
            .query("mcc", query.mcc())
            .query("mnc", query.mnc())
            .query("lac", query.lac().to_string())
            .query("cellid", query.cell_id().to_string())
            .query("radio", query.radio().as_str().to_ascii_uppercase())
            .query("format", "json")
            .header("Accept", "application/json"))
    }

    fn parse_response(&self, _query: &CellQuery, response: &HttpResponse) -> Result<GeoFix> {
        if !response.is_success() {
            return Err(error_from_status(PROVIDER, response));
        }

        let json = parse_json(PROVIDER, response)?;
        if !json.is_object() {
            return Err(LookupError::malformed(PROVIDER, "response is not a JSON object"));
        }

        let errored = json.get("stat").and_then(|s| s.as_str()) == Some("error");
        if let Some(message) = str_field(&json, "error") {
            return Err(LookupError::Provider {
                provider: PROVIDER,
                status: None,
                kind: ProviderFailureKind::detect(&message, None),
                message,
            });
        }
        if errored {
            return Err(LookupError::Provider {
                provider: PROVIDER,
                status: None,
                kind: ProviderFailureKind::Other,
                message: "provider reported stat=error without a message".to_string(),
            });
        }

        fix_from_coordinates(
            PROVIDER,
            number_field(&json, "lat"),
            number_field(&json, "lon"),
            number_field(&json, "range").or_else(|| number_field(&json, "accuracy")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sleuth_validate::{validate_cell_lookup, RawCellLookup, ValidationContext};

    fn query() -> CellQuery {
        let raw = RawCellLookup {
            mnc: Some("02".to_string()),
            lac: Some("12345".to_string()),
            cell_id: Some("6789".to_string()),
            ..RawCellLookup::default()
        };
        validate_cell_lookup(&raw, &ValidationContext::default()).expect("valid query")
    }

    fn key() -> ApiKey {
        ApiKey::resolve(Some("pk.test")).expect("valid key")
    }

    fn ok(body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_build_request() {
        let adapter = OpenCellIdAdapter::new("https://opencellid.org/");
        let request = adapter.build_request(&query(), &key()).expect("build request");

        assert_eq!(request.url, "https://opencellid.org/cell/get");
        assert_eq!(request.query_value("key"), Some("pk.test"));
        assert_eq!(request.query_value("mcc"), Some("470"));
        assert_eq!(request.query_value("mnc"), Some("02"));
        assert_eq!(request.query_value("lac"), Some("12345"));
        assert_eq!(request.query_value("cellid"), Some("6789"));
        assert_eq!(request.query_value("format"), Some("json"));
    }

    #[test]
    fn test_parse_success() {
        let adapter = OpenCellIdAdapter::new("https://opencellid.org");
        let fix = adapter
            .parse_response(&query(), &ok(json!({"lat": 23.8103, "lon": 90.4125, "range": 1500})))
            .expect("parse fix");

        assert_eq!(fix.latitude, 23.8103);
        assert_eq!(fix.longitude, 90.4125);
        assert_eq!(fix.accuracy_meters, Some(1500.0));
        assert_eq!(fix.map_url, "https://www.google.com/maps?q=23.8103,90.4125");
    }

    #[test]
    fn test_parse_no_match() {
        let adapter = OpenCellIdAdapter::new("https://opencellid.org");
        let err = adapter
            .parse_response(
                &query(),
                &ok(json!({"error": "no matches found for query", "stat": "error"})),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::NoMatch,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_missing_coordinates_is_no_match() {
        let adapter = OpenCellIdAdapter::new("https://opencellid.org");
        let err = adapter
            .parse_response(&query(), &ok(json!({"lat": 23.8103, "range": 1500})))
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::NoMatch,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_non_json() {
        let adapter = OpenCellIdAdapter::new("https://opencellid.org");
        let response = HttpResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: "<html>maintenance</html>".to_string(),
        };
        let err = adapter.parse_response(&query(), &response).unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { .. }));
    }
}
