//! Caller-ID name lookup over RapidAPI.

use super::common::{error_from_status, extract_message, parse_json, str_field, string_list};
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use serde_json::Value;
use sleuth_core::{
    ApiKey, CallerIdOutcome, CredentialSlot, LookupError, ProviderFailureKind, Result,
};
use sleuth_validate::CallerIdQuery;

const PROVIDER: &str = "rapidapi-eyecon";

/// Eyecon caller-ID adapter (`GET https://{host}/api/v1/search`).
#[derive(Debug, Clone)]
pub struct CallerIdAdapter {
    host: String,
}

impl CallerIdAdapter {
    /// Create an adapter for the RapidAPI `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl ProviderAdapter for CallerIdAdapter {
    type Query = CallerIdQuery;
    type Output = CallerIdOutcome;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::RapidApi
    }

    fn build_request(&self, query: &CallerIdQuery, key: &ApiKey) -> Result<HttpRequest> {
        Ok(HttpRequest::get(format!("https://{}/api/v1/search", self.host))
            .query("code", query.country_code())
            .query("number", query.national_number())
            .header("x-rapidapi-key", key.expose())
            .header("x-rapidapi-host", self.host.as_str()))
    }

    fn parse_response(
        &self,
        query: &CallerIdQuery,
        response: &HttpResponse,
    ) -> Result<CallerIdOutcome> {
        if !response.is_success() {
            return match error_from_status(PROVIDER, response) {
                LookupError::Provider {
                    kind: ProviderFailureKind::NoMatch,
                    ..
                } => Ok(CallerIdOutcome::not_found(query.e164())),
                other => Err(other),
            };
        }

        let json = parse_json(PROVIDER, response)?;

        if json.get("status").and_then(Value::as_bool) == Some(false) {
            let message = extract_message(&json)
                .unwrap_or_else(|| "provider reported status=false".to_string());
            return match ProviderFailureKind::detect(&message, None) {
                ProviderFailureKind::NoMatch => Ok(CallerIdOutcome::not_found(query.e164())),
                kind => Err(LookupError::Provider {
                    provider: PROVIDER,
                    status: None,
                    kind,
                    message,
                }),
            };
        }

        let Some(data) = json.get("data").filter(|d| !d.is_null()) else {
            return Ok(CallerIdOutcome::not_found(query.e164()));
        };
        if !data.is_object() {
            return Err(LookupError::malformed(PROVIDER, "data is not an object"));
        }

        let name = str_field(data, "fullName").or_else(|| str_field(data, "name"));
        let mut other_names: Vec<String> = Vec::new();
        for candidate in string_list(data, "otherNames", "name") {
            if Some(&candidate) != name.as_ref() && !other_names.contains(&candidate) {
                other_names.push(candidate);
            }
        }

        Ok(CallerIdOutcome {
            number: query.e164(),
            found: name.is_some(),
            name,
            other_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sleuth_validate::{validate_caller_id, RawCallerId};

    fn query() -> CallerIdQuery {
        let raw = RawCallerId {
            country_code: Some("880".to_string()),
            national_number: Some("1712345678".to_string()),
        };
        validate_caller_id(&raw).expect("valid query")
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
        let adapter = CallerIdAdapter::new("eyecon.p.rapidapi.com");
        let key = ApiKey::resolve(Some("rapid-123")).expect("valid key");
        let request = adapter.build_request(&query(), &key).expect("build request");

        assert_eq!(request.url, "https://eyecon.p.rapidapi.com/api/v1/search");
        assert_eq!(request.query_value("code"), Some("880"));
        assert_eq!(request.query_value("number"), Some("1712345678"));
        assert_eq!(request.header_value("x-rapidapi-key"), Some("rapid-123"));
        assert_eq!(
            request.header_value("x-rapidapi-host"),
            Some("eyecon.p.rapidapi.com")
        );
    }

    #[test]
    fn test_parse_found_dedupes_names() {
        let adapter = CallerIdAdapter::new("eyecon.p.rapidapi.com");
        let outcome = adapter
            .parse_response(
                &query(),
                &ok(json!({
                    "status": true,
                    "data": {
                        "fullName": "Rahim Uddin",
                        "otherNames": [{"name": "Rahim"}, {"name": "Rahim Uddin"}, {"name": "Rahim"}]
                    }
                })),
            )
            .expect("parse outcome");

        assert_eq!(outcome.number, "+8801712345678");
        assert!(outcome.found);
        assert_eq!(outcome.name.as_deref(), Some("Rahim Uddin"));
        assert_eq!(outcome.other_names, vec!["Rahim"]);
    }

    #[test]
    fn test_parse_no_match_is_not_found() {
        let adapter = CallerIdAdapter::new("eyecon.p.rapidapi.com");
        let outcome = adapter
            .parse_response(
                &query(),
                &ok(json!({"status": false, "message": "No matches found"})),
            )
            .expect("no match is a success");
        assert_eq!(outcome, CallerIdOutcome::not_found("+8801712345678"));

        let outcome = adapter
            .parse_response(&query(), &ok(json!({"status": true, "data": null})))
            .expect("null data is a success");
        assert!(!outcome.found);
    }

    #[test]
    fn test_parse_subscription_error() {
        let adapter = CallerIdAdapter::new("eyecon.p.rapidapi.com");
        let response = HttpResponse {
            status: 403,
            content_type: Some("application/json".to_string()),
            body: json!({"message": "You are not subscribed to this API."}).to_string(),
        };
        let err = adapter.parse_response(&query(), &response).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::AuthRejected,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_missing_endpoint_is_a_failure() {
        let adapter = CallerIdAdapter::new("eyecon.p.rapidapi.com");
        let response = HttpResponse {
            status: 404,
            content_type: Some("application/json".to_string()),
            body: json!({"message": "Endpoint '/api/v1/search' does not exist"}).to_string(),
        };
        let err = adapter.parse_response(&query(), &response).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::BadRequest,
                status: Some(404),
                ..
            }
        ));

        let response = HttpResponse {
            status: 404,
            content_type: Some("application/json".to_string()),
            body: json!({"message": "No matches found"}).to_string(),
        };
        let outcome = adapter
            .parse_response(&query(), &response)
            .expect("no-match phrase is a success");
        assert!(!outcome.found);
    }
}
