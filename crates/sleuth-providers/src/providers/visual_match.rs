//! Reverse image search ("lens") over RapidAPI.

use super::common::{error_from_status, extract_message, number_field, parse_json, str_field};
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use serde_json::Value;
use sleuth_core::{
    ApiKey, CredentialSlot, LookupError, MatchItem, ProviderFailureKind, Result,
    VisualMatchOutcome,
};
use sleuth_validate::VisualQuery;

const PROVIDER: &str = "rapidapi-lens";

/// Real-time lens adapter (`GET https://{host}/search?url&language=en`).
#[derive(Debug, Clone)]
pub struct VisualMatchAdapter {
    host: String,
}

impl VisualMatchAdapter {
    /// Create an adapter for the RapidAPI `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl ProviderAdapter for VisualMatchAdapter {
    type Query = VisualQuery;
    type Output = VisualMatchOutcome;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::RapidApi
    }

    fn build_request(&self, query: &VisualQuery, key: &ApiKey) -> Result<HttpRequest> {
        Ok(HttpRequest::get(format!("https://{}/search", self.host))
            .query("url", query.image_url().as_str())
            .query("language", "en")
            .header("x-rapidapi-key", key.expose())
            .header("x-rapidapi-host", self.host.as_str()))
    }

    fn parse_response(
        &self,
        _query: &VisualQuery,
        response: &HttpResponse,
    ) -> Result<VisualMatchOutcome> {
        if !response.is_success() {
            return Err(error_from_status(PROVIDER, response));
        }

        let json = parse_json(PROVIDER, response)?;

        if json.get("status").and_then(Value::as_str) == Some("ERROR") {
            let message = extract_message(&json)
                .unwrap_or_else(|| "provider reported status=ERROR".to_string());
            return Err(LookupError::Provider {
                provider: PROVIDER,
                status: None,
                kind: ProviderFailureKind::detect(&message, None),
                message,
            });
        }

        let list = json
            .get("data")
            .and_then(|d| d.get("visual_matches"))
            .or_else(|| json.get("visual_matches"))
            .and_then(Value::as_array)
            .ok_or_else(|| LookupError::malformed(PROVIDER, "response has no visual_matches list"))?;

        let matches = list
            .iter()
            .filter_map(|item| {
                let url = str_field(item, "link").or_else(|| str_field(item, "url"))?;
                Some(MatchItem {
                    title: str_field(item, "title"),
                    source: str_field(item, "source").or_else(|| str_field(item, "source_name")),
                    score: number_field(item, "score").and_then(MatchItem::normalize_score),
                    thumbnail: str_field(item, "thumbnail").or_else(|| str_field(item, "image")),
                    url,
                })
            })
            .collect();

        Ok(VisualMatchOutcome { matches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sleuth_validate::{validate_visual_match, RawVisualMatch};

    fn query() -> VisualQuery {
        let raw = RawVisualMatch {
            image_url: Some("https://example.com/tower.jpg".to_string()),
        };
        validate_visual_match(&raw).expect("valid query")
    }

    fn ok(body: Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_build_request() {
        let adapter = VisualMatchAdapter::new("real-time-lens-data.p.rapidapi.com");
        let key = ApiKey::resolve(Some("rapid-123")).expect("valid key");
        let request = adapter.build_request(&query(), &key).expect("build request");

        assert_eq!(
            request.url,
            "https://real-time-lens-data.p.rapidapi.com/search"
        );
        assert_eq!(request.query_value("url"), Some("https://example.com/tower.jpg"));
        assert_eq!(request.query_value("language"), Some("en"));
    }

    #[test]
    fn test_parse_matches_keep_order() {
        let adapter = VisualMatchAdapter::new("real-time-lens-data.p.rapidapi.com");
        let outcome = adapter
            .parse_response(
                &query(),
                &ok(json!({
                    "status": "OK",
                    "data": {"visual_matches": [
                        {"title": "Tower", "link": "https://b.example/1", "source": "B", "thumbnail": "https://t/1.jpg"},
                        {"title": "No link"},
                        {"link": "https://a.example/2"}
                    ]}
                })),
            )
            .expect("parse matches");

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].url, "https://b.example/1");
        assert_eq!(outcome.matches[0].source.as_deref(), Some("B"));
        assert_eq!(outcome.matches[0].score, None);
        assert_eq!(outcome.matches[1].title, None);
    }

    #[test]
    fn test_parse_error_status() {
        let adapter = VisualMatchAdapter::new("real-time-lens-data.p.rapidapi.com");
        let err = adapter
            .parse_response(
                &query(),
                &ok(json!({"status": "ERROR", "error": {"message": "Invalid request"}})),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::BadRequest,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_missing_list_is_malformed() {
        let adapter = VisualMatchAdapter::new("real-time-lens-data.p.rapidapi.com");
        let err = adapter
            .parse_response(&query(), &ok(json!({"status": "OK", "data": {}})))
            .unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { .. }));
    }
}
