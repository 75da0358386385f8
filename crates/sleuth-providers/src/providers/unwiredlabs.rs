//! Unwired Labs location API.

use super::common::{error_from_status, number_field, parse_json, str_field};
use super::geo::fix_from_coordinates;
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use serde::Serialize;
use sleuth_core::{ApiKey, CredentialSlot, GeoFix, LookupError, ProviderFailureKind, Result};
use sleuth_validate::CellQuery;

const PROVIDER: &str = "unwiredlabs";

/// Unwired Labs `v2/process.php` adapter.
///
/// Sends a JSON `POST` with one cell and `address: 1`; answers carry
/// `status: "ok" | "error"`, coordinates, `accuracy` and an optional address.
#[derive(Debug, Clone)]
pub struct UnwiredLabsAdapter {
    base_url: String,
}

impl UnwiredLabsAdapter {
    /// Create an adapter against `base_url` (e.g. `https://us1.unwiredlabs.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UnwiredRequest<'a> {
    token: &'a str,
    radio: &'a str,
    mcc: u16,
    mnc: u16,
    cells: [UnwiredCell; 1],
    address: u8,
}

#[derive(Debug, Serialize)]
struct UnwiredCell {
    lac: u32,
    cid: u32,
}

impl ProviderAdapter for UnwiredLabsAdapter {
    type Query = CellQuery;
    type Output = GeoFix;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::UnwiredLabs
    }

    fn build_request(&self, query: &CellQuery, key: &ApiKey) -> Result<HttpRequest> {
        let numeric = |label: &str, value: &str| {
            value.parse::<u16>().map_err(|e| {
                LookupError::Unexpected(format!("{label} '{value}' is not numeric: {e}"))
            })
        };

        let body = UnwiredRequest {
            token: key.expose(),
            radio: query.radio().as_str(),
            mcc: numeric("mcc", query.mcc())?,
            mnc: numeric("mnc", query.mnc())?,
            cells: [UnwiredCell {
                lac: query.lac(),
                cid: query.cell_id(),
            }],
            address: 1,
        };

        let body = serde_json::to_value(&body)
            .map_err(|e| LookupError::Unexpected(format!("failed to encode request: {e}")))?;

        Ok(HttpRequest::post(format!("{}/v2/process.php", self.base_url))
            .header("Accept", "application/json")
            .json(body))
    }

    fn parse_response(&self, _query: &CellQuery, response: &HttpResponse) -> Result<GeoFix> {
        if !response.is_success() {
            return Err(error_from_status(PROVIDER, response));
        }

        let json = parse_json(PROVIDER, response)?;
        let status = str_field(&json, "status").map(|s| s.to_ascii_lowercase());

        match status.as_deref() {
            Some("ok") => {}
            Some("error") => {
                let message = str_field(&json, "message")
                    .unwrap_or_else(|| "provider reported an error".to_string());
                return Err(LookupError::Provider {
                    provider: PROVIDER,
                    status: None,
                    kind: ProviderFailureKind::detect(&message, None),
                    message,
                });
            }
            other => {
                return Err(LookupError::malformed(
                    PROVIDER,
                    format!("unexpected status field: {other:?}"),
                ));
            }
        }

        let fix = fix_from_coordinates(
            PROVIDER,
            number_field(&json, "lat"),
            number_field(&json, "lon"),
            number_field(&json, "accuracy"),
        )?;
        Ok(fix.with_address(str_field(&json, "address")))
    }
}
