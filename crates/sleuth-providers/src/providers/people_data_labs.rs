//! People Data Labs person enrichment.

use super::common::{error_from_status, number_field, parse_json, str_field, string_list};
use crate::adapter::ProviderAdapter;
use crate::transport::{HttpRequest, HttpResponse};
use serde_json::Value;
use sleuth_core::{
    ApiKey, CredentialSlot, LookupError, PersonProfile, PersonSearchOutcome, ProviderFailureKind,
    Result,
};
use sleuth_validate::PersonQuery;

const PROVIDER: &str = "peopledatalabs";

/// Lowest match likelihood (1-10) the enrich endpoint may return.
const MIN_LIKELIHOOD: &str = "2";

/// People Data Labs `v5/person/enrich` adapter.
///
/// A body whose `error.type` is `not_found`, or whose message is a known
/// no-match phrase, is a successful "no record" outcome rather than a
/// failure. Any other 404 is a provider failure.
#[derive(Debug, Clone)]
pub struct PeopleDataLabsAdapter {
    base_url: String,
}

impl PeopleDataLabsAdapter {
    /// Create an adapter against `base_url` (e.g. `https://api.peopledatalabs.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ProviderAdapter for PeopleDataLabsAdapter {
    type Query = PersonQuery;
    type Output = PersonSearchOutcome;

    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn credential_slot(&self) -> CredentialSlot {
        CredentialSlot::PeopleDataLabs
    }

    fn build_request(&self, query: &PersonQuery, key: &ApiKey) -> Result<HttpRequest> {
        let mut request = HttpRequest::get(format!("{}/v5/person/enrich", self.base_url))
            .query("name", query.full_name())
            .query("locality", query.city());
        if let Some(country) = query.country() {
            request = request.query("country", country);
        }

        Ok(request
            .query("min_likelihood", MIN_LIKELIHOOD)
            .header("X-Api-Key", key.expose())
            .header("Accept", "application/json"))
    }

    fn parse_response(
        &self,
        _query: &PersonQuery,
        response: &HttpResponse,
    ) -> Result<PersonSearchOutcome> {
        if is_not_found_body(response) {
            return Ok(PersonSearchOutcome::not_found());
        }
        if !response.is_success() {
            return match error_from_status(PROVIDER, response) {
                LookupError::Provider {
                    kind: ProviderFailureKind::NoMatch,
                    ..
                } => Ok(PersonSearchOutcome::not_found()),
                other => Err(other),
            };
        }

        let json = parse_json(PROVIDER, response)?;
        let Some(data) = json.get("data").filter(|d| d.is_object()) else {
            return Err(LookupError::malformed(PROVIDER, "response has no data object"));
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let likelihood = number_field(&json, "likelihood")
            .filter(|l| (0.0..=10.0).contains(l))
            .map(|l| l.round() as u8);

        Ok(PersonSearchOutcome {
            found: true,
            likelihood,
            profile: Some(profile(data)),
        })
    }
}

fn is_not_found_body(response: &HttpResponse) -> bool {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|json| json.get("error").and_then(|e| str_field(e, "type")))
        .is_some_and(|kind| kind == "not_found")
}

fn profile(data: &Value) -> PersonProfile {
    let location = str_field(data, "location_name").or_else(|| {
        let parts: Vec<String> = ["location_locality", "location_region", "location_country"]
            .iter()
            .filter_map(|k| str_field(data, k))
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    });

    let linkedin_url = str_field(data, "linkedin_url").map(|url| {
        if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("https://{url}")
        }
    });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let birth_year = number_field(data, "birth_year")
        .filter(|y| (1800.0..=2200.0).contains(y))
        .map(|y| y as u16);

    let mut emails = string_list(data, "emails", "address");
    for personal in string_list(data, "personal_emails", "address") {
        if !emails.contains(&personal) {
            emails.push(personal);
        }
    }

    PersonProfile {
        full_name: str_field(data, "full_name"),
        job_title: str_field(data, "job_title"),
        job_company: str_field(data, "job_company_name"),
        location,
        linkedin_url,
        sex: str_field(data, "sex"),
        birth_year,
        emails,
        phone_numbers: string_list(data, "phone_numbers", "number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sleuth_validate::{validate_person_search, RawPersonSearch};

    fn query(country: Option<&str>) -> PersonQuery {
        let raw = RawPersonSearch {
            full_name: Some("Jane Doe".to_string()),
            city: Some("Austin".to_string()),
            country: country.map(str::to_string),
        };
        validate_person_search(&raw).expect("valid query")
    }

    fn response(status: u16, body: Value) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_build_request() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let key = ApiKey::resolve(Some("pdl_live_1")).expect("valid key");

        let request = adapter.build_request(&query(None), &key).expect("build request");
        assert_eq!(request.url, "https://api.peopledatalabs.com/v5/person/enrich");
        assert_eq!(request.query_value("name"), Some("Jane Doe"));
        assert_eq!(request.query_value("locality"), Some("Austin"));
        assert_eq!(request.query_value("country"), None);
        assert_eq!(request.header_value("x-api-key"), Some("pdl_live_1"));

        let request = adapter
            .build_request(&query(Some("United States")), &key)
            .expect("build request");
        assert_eq!(request.query_value("country"), Some("United States"));
    }

    #[test]
    fn test_parse_match() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let outcome = adapter
            .parse_response(
                &query(None),
                &response(
                    200,
                    json!({
                        "status": 200,
                        "likelihood": 8,
                        "data": {
                            "full_name": "jane doe",
                            "job_title": "engineer",
                            "job_company_name": "acme",
                            "location_locality": "austin",
                            "location_region": "texas",
                            "linkedin_url": "linkedin.com/in/janedoe",
                            "sex": "female",
                            "birth_year": 1990,
                            "emails": [{"address": "jane@acme.com", "type": "professional"}, true],
                            "personal_emails": ["jane@example.com", "jane@acme.com"],
                            "phone_numbers": ["+15125550100"]
                        }
                    }),
                ),
            )
            .expect("parse outcome");

        assert!(outcome.found);
        assert_eq!(outcome.likelihood, Some(8));
        let profile = outcome.profile.expect("profile");
        assert_eq!(profile.job_company.as_deref(), Some("acme"));
        assert_eq!(profile.location.as_deref(), Some("austin, texas"));
        assert_eq!(
            profile.linkedin_url.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(profile.birth_year, Some(1990));
        assert_eq!(profile.emails, vec!["jane@acme.com", "jane@example.com"]);
        assert_eq!(profile.phone_numbers, vec!["+15125550100"]);
    }

    #[test]
    fn test_parse_not_found() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let outcome = adapter
            .parse_response(
                &query(None),
                &response(
                    404,
                    json!({"status": 404, "error": {"type": "not_found", "message": "No records were found matching your request"}}),
                ),
            )
            .expect("not found is a success");
        assert_eq!(outcome, PersonSearchOutcome::not_found());

        let outcome = adapter
            .parse_response(
                &query(None),
                &response(404, json!({"message": "No records were found"})),
            )
            .expect("no-match phrase is a success");
        assert!(!outcome.found);
    }

    #[test]
    fn test_parse_bare_404_is_a_failure() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let html = HttpResponse {
            status: 404,
            content_type: Some("text/html".to_string()),
            body: "<html>404 Not Found (nginx)</html>".to_string(),
        };
        let err = adapter.parse_response(&query(None), &html).unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { .. }));

        let err = adapter
            .parse_response(
                &query(None),
                &response(404, json!({"status": 404, "error": {"type": "invalid_request_error", "message": "Route does not exist"}})),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::BadRequest,
                status: Some(404),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rate_limited() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let err = adapter
            .parse_response(
                &query(None),
                &response(
                    429,
                    json!({"status": 429, "error": {"type": "rate_limit_error", "message": "Rate limit exceeded"}}),
                ),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Provider {
                kind: ProviderFailureKind::RateLimited,
                status: Some(429),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_missing_data_is_malformed() {
        let adapter = PeopleDataLabsAdapter::new("https://api.peopledatalabs.com");
        let err = adapter
            .parse_response(&query(None), &response(200, json!({"status": 200})))
            .unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { .. }));
    }
}
