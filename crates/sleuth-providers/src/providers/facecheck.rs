//! FaceCheck reverse face search.

use super::common::{error_from_status, extract_message, number_field, parse_json, str_field};
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse, MultipartPart};
use serde_json::Value;
use sleuth_core::{
    ApiKey, CredentialSlot, FaceSearchOutcome, LookupError, MatchItem, ProviderFailureKind,
    Result,
};
use sleuth_validate::{FaceQuery, ImageSource};
use url::Url;

const PROVIDER: &str = "facecheck";

/// FaceCheck `api/upload_pic` adapter.
#[derive(Debug, Clone)]
pub struct FaceCheckAdapter {
    base_url: String,
}

impl FaceCheckAdapter {
    /// Create an adapter against `base_url` (e.g. `https://facecheck.id`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ProviderAdapter for FaceCheckAdapter {
    type Query = FaceQuery;
    type Output = FaceSearchOutcome;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::FaceCheck
    }

    fn build_request(&self, query: &FaceQuery, key: &ApiKey) -> Result<HttpRequest> {
        let part = match query.image() {
            ImageSource::Upload(upload) => MultipartPart::File {
                name: "image_file".to_string(),
                file_name: upload.file_name(),
                mime: upload.mime().to_string(),
                bytes: upload.bytes().to_vec(),
            },
            ImageSource::Remote(url) => MultipartPart::Text {
                name: "image_url".to_string(),
                value: url.to_string(),
            },
        };

        Ok(HttpRequest::post(format!("{}/api/upload_pic", self.base_url))
            .header("x-api-key", key.expose())
            .header("Accept", "application/json")
            .multipart(vec![part]))
    }

    fn parse_response(
        &self,
        _query: &FaceQuery,
        response: &HttpResponse,
    ) -> Result<FaceSearchOutcome> {
        if !response.is_success() {
            return Err(error_from_status(PROVIDER, response));
        }

        let json = parse_json(PROVIDER, response)?;

        // FaceCheck reports some failures with a 200 and an `error` field.
        if let Some(message) = str_field(&json, "error") {
            return Err(LookupError::Provider {
                provider: PROVIDER,
                status: None,
                kind: ProviderFailureKind::detect(&message, None),
                message,
            });
        }

        let items = json
            .get("output")
            .and_then(|o| o.get("items"))
            .or_else(|| json.get("items"))
            .or_else(|| json.get("results"))
            .and_then(Value::as_array);

        let Some(items) = items else {
            let detail = extract_message(&json)
                .unwrap_or_else(|| "response has no result list".to_string());
            return Err(LookupError::malformed(PROVIDER, detail));
        };

        let mut matches: Vec<MatchItem> = items.iter().filter_map(match_item).collect();
        matches.sort_by(|a, b| {
            b.score
                .unwrap_or(f64::MIN)
                .total_cmp(&a.score.unwrap_or(f64::MIN))
        });

        tracing::debug!(count = matches.len(), "FaceCheck matches parsed");

        Ok(FaceSearchOutcome { matches })
    }
}

fn match_item(item: &Value) -> Option<MatchItem> {
    let url = str_field(item, "url")?;
    let source = Url::parse(&url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()));

    Some(MatchItem {
        title: str_field(item, "title"),
        source,
        score: number_field(item, "score").and_then(MatchItem::normalize_score),
        thumbnail: str_field(item, "thumbnail")
            .or_else(|| str_field(item, "base64"))
            .or_else(|| str_field(item, "image_url")),
        url,
    })
}
