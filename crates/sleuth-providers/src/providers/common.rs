//! Common utilities shared across provider adapters.

use crate::transport::{HttpResponse, TransportError};
use reqwest::Client;
use serde_json::Value;
use sleuth_core::{HttpConfig, LookupError, ProviderFailureKind, Result};
use std::time::Duration;

/// Longest slice of a provider body kept in diagnostics.
const SNIPPET_CHARS: usize = 200;

/// Build the HTTP client with the configured timeout and user agent.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, TransportError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| TransportError::Other(format!("failed to create HTTP client: {e}")))
}

/// First `SNIPPET_CHARS` characters of `body`, trimmed.
#[must_use]
pub fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > SNIPPET_CHARS {
        let cut: String = trimmed.chars().take(SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

/// Parse a body as JSON; failure is a malformed-response error.
pub fn parse_json(provider: &'static str, response: &HttpResponse) -> Result<Value> {
    serde_json::from_str(&response.body).map_err(|e| {
        LookupError::malformed(
            provider,
            format!(
                "HTTP {} body is not valid JSON ({e}): {}",
                response.status,
                snippet(&response.body)
            ),
        )
    })
}

/// Turn a non-2xx response into an error.
///
/// The body is parsed as JSON only if it is JSON. A non-JSON body still maps
/// to a provider error when the status alone identifies the failure (429,
/// 401, ...); otherwise it is a malformed response. A non-JSON 404 is an
/// error page from something in front of the API, so it is malformed too.
pub fn error_from_status(provider: &'static str, response: &HttpResponse) -> LookupError {
    let status = Some(response.status);
    let status_kind = match response.status {
        404 => None,
        code => ProviderFailureKind::from_status(code),
    };
    match serde_json::from_str::<Value>(&response.body) {
        Ok(json) => {
            let message = extract_message(&json)
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            LookupError::Provider {
                provider,
                status,
                kind: ProviderFailureKind::detect(&message, status),
                message,
            }
        }
        Err(_) => match status_kind {
            Some(kind) => LookupError::Provider {
                provider,
                status,
                kind,
                message: snippet(&response.body),
            },
            None => LookupError::malformed(
                provider,
                format!(
                    "HTTP {} with non-JSON body: {}",
                    response.status,
                    snippet(&response.body)
                ),
            ),
        },
    }
}

/// Pull a human-readable message out of the usual error-body shapes:
/// `{"message"}`, `{"error": "..."}`, `{"error": {"message"}}`, `{"detail"}`.
#[must_use]
pub fn extract_message(json: &Value) -> Option<String> {
    str_field(json, "message")
        .or_else(|| str_field(json, "error"))
        .or_else(|| json.get("error").and_then(|e| str_field(e, "message")))
        .or_else(|| str_field(json, "detail"))
        .or_else(|| str_field(json, "error_message"))
}

/// Non-empty trimmed string field.
#[must_use]
pub fn str_field(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric field, accepting JSON numbers or numeric strings.
#[must_use]
pub fn number_field(json: &Value, key: &str) -> Option<f64> {
    let value = match json.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|n| n.is_finite())
}

/// List of strings from an array of strings or of objects carrying `object_key`.
#[must_use]
pub fn string_list(json: &Value, key: &str, object_key: &str) -> Vec<String> {
    let Some(items) = json.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(_) => str_field(item, object_key),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}
