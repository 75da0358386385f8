//! Maps internal failures to displayable results.
//!
//! This is the only place user-facing failure text is written. Every
//! [`LookupError`] maps to exactly one [`FailureCategory`]; the internal
//! diagnostic (`error`) keeps the full detail while `message` stays short
//! and stable.

use sleuth_core::{Failure, LookupError, ProviderFailureKind, ToolKind};

/// Longest provider message surfaced to users verbatim.
const MAX_PROVIDER_MESSAGE_CHARS: usize = 160;

/// Classify `error` raised while running `tool`.
#[must_use]
pub fn classify(tool: ToolKind, error: &LookupError) -> Failure {
    let message = match error {
        LookupError::Configuration { provider, .. } => format!(
            "{} lookups are not configured. Add a valid {} API key and try again.",
            tool_label(tool),
            provider_label(provider)
        ),
        LookupError::Validation(violations) => violations.to_string(),
        LookupError::Transport { provider, .. } => format!(
            "Request failed: could not reach {}. Please try again later.",
            provider_label(provider)
        ),
        LookupError::Provider {
            provider,
            kind,
            message,
            ..
        } => provider_message(tool, provider, *kind, message),
        LookupError::MalformedResponse { provider, .. } => format!(
            "{} returned a response that could not be read. Please try again later.",
            provider_label(provider)
        ),
        LookupError::Unexpected(_) => format!(
            "Something went wrong while running the {} lookup. Please try again.",
            tool_label(tool).to_lowercase()
        ),
    };

    Failure::new(error.category(), error.to_string(), message)
}

fn provider_message(
    tool: ToolKind,
    provider: &str,
    kind: ProviderFailureKind,
    raw: &str,
) -> String {
    let name = provider_label(provider);
    match kind {
        ProviderFailureKind::NoMatch => no_match_message(tool).to_string(),
        ProviderFailureKind::RateLimited => {
            format!("{name} is receiving too many requests. Please wait a moment and try again.")
        }
        ProviderFailureKind::AuthRejected => {
            format!("{name} rejected the configured API key. Check the key and its subscription.")
        }
        ProviderFailureKind::QuotaExhausted => {
            format!("The {name} account has no remaining credits.")
        }
        ProviderFailureKind::BadRequest => match safe_text(raw) {
            Some(detail) => format!("{name} could not process this request: {detail}"),
            None => format!("{name} could not process this request."),
        },
        ProviderFailureKind::Other => match safe_text(raw) {
            Some(detail) => format!("{name} reported an error: {detail}"),
            None => format!("{name} reported an error."),
        },
    }
}

fn no_match_message(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::PersonSearch => "No records were found for this person.",
        ToolKind::FaceSearch => "No matching faces were found for this image.",
        ToolKind::CallerId => "No caller name is known for this number.",
        ToolKind::VisualMatch => "No visually similar images were found.",
        ToolKind::CellLookup => {
            "No location data found for the provided Cell ID, LAC, and operator combination. \
             Double-check the values and try again."
        }
    }
}

/// Provider text trimmed to one short printable line.
fn safe_text(raw: &str) -> Option<String> {
    let line: String = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !c.is_control())
        .collect();

    if line.is_empty() || line.starts_with('<') {
        return None;
    }
    if line.chars().count() > MAX_PROVIDER_MESSAGE_CHARS {
        let cut: String = line.chars().take(MAX_PROVIDER_MESSAGE_CHARS).collect();
        return Some(format!("{}...", cut.trim_end()));
    }
    Some(line)
}

/// Human-readable tool name.
#[must_use]
pub fn tool_label(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::PersonSearch => "Person search",
        ToolKind::FaceSearch => "Face search",
        ToolKind::CallerId => "Caller ID",
        ToolKind::VisualMatch => "Visual match",
        ToolKind::CellLookup => "Cell tower",
    }
}

/// Human-readable provider name.
#[must_use]
pub fn provider_label(provider: &str) -> &str {
    match provider {
        "facecheck" => "FaceCheck.ID",
        "peopledatalabs" => "People Data Labs",
        "rapidapi-eyecon" => "the caller ID service",
        "rapidapi-lens" => "the visual match service",
        "opencellid" => "OpenCellID",
        "unwiredlabs" => "Unwired Labs",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::{CredentialError, FailureCategory, ValidationError};

    #[test]
    fn test_configuration() {
        let failure = classify(
            ToolKind::CellLookup,
            &LookupError::Configuration {
                provider: "opencellid",
                reason: CredentialError::Placeholder,
            },
        );
        assert_eq!(failure.category, FailureCategory::Configuration);
        assert!(failure.message.contains("OpenCellID API key"));
    }

    #[test]
    fn test_validation_lists_every_rule() {
        let mut violations = ValidationError::single("LAC is required");
        violations.push("Cell ID must be a positive integer");
        let failure = classify(ToolKind::CellLookup, &LookupError::Validation(violations));

        assert_eq!(failure.category, FailureCategory::Validation);
        assert_eq!(
            failure.message,
            "LAC is required; Cell ID must be a positive integer"
        );
    }

    #[test]
    fn test_cell_no_match_is_remapped() {
        let failure = classify(
            ToolKind::CellLookup,
            &LookupError::Provider {
                provider: "opencellid",
                status: None,
                kind: ProviderFailureKind::NoMatch,
                message: "no matches found for query".to_string(),
            },
        );
        assert_eq!(failure.category, FailureCategory::Provider);
        assert!(failure.message.starts_with(
            "No location data found for the provided Cell ID, LAC, and operator combination"
        ));
        assert!(failure.error.contains("no matches found for query"));
    }

    #[test]
    fn test_other_provider_message_is_surfaced_and_truncated() {
        let long = format!("Upstream said: {}", "z".repeat(400));
        let failure = classify(
            ToolKind::FaceSearch,
            &LookupError::Provider {
                provider: "facecheck",
                status: Some(500),
                kind: ProviderFailureKind::Other,
                message: long,
            },
        );
        assert!(failure.message.starts_with("FaceCheck.ID reported an error: Upstream said:"));
        assert!(failure.message.ends_with("..."));
        assert!(failure.message.len() < 220);
    }

    #[test]
    fn test_markup_is_not_surfaced() {
        assert_eq!(safe_text("<html><body>502</body></html>"), None);
        assert_eq!(safe_text("  bad\n\tthing "), Some("bad thing".to_string()));
    }

    #[test]
    fn test_transport_and_unexpected() {
        let failure = classify(
            ToolKind::CallerId,
            &LookupError::Transport {
                provider: "rapidapi-eyecon",
                detail: "request timed out".to_string(),
            },
        );
        assert_eq!(failure.category, FailureCategory::Transport);
        assert!(failure.message.starts_with("Request failed"));
        assert!(failure.error.contains("request timed out"));

        let failure = classify(
            ToolKind::VisualMatch,
            &LookupError::Unexpected("adapter panicked: boom".to_string()),
        );
        assert_eq!(failure.category, FailureCategory::Unexpected);
        assert!(!failure.message.contains("boom"));
        assert!(failure.error.contains("boom"));
    }
}
