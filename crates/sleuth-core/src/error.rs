//! Core error types for Sleuth lookups.
//!
//! [`LookupError`] is the one internal failure type that travels from the
//! validator and the provider adapters up to the orchestration boundary, where
//! it is classified into a displayable [`Failure`](crate::result::Failure).
//! It never crosses into the presentation layer itself.

use crate::credential::CredentialError;
use crate::result::FailureCategory;
use std::fmt;
use thiserror::Error;

/// Internal failure raised by any stage of a lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Required credential is missing, empty or a placeholder
    #[error("configuration error ({provider}): {reason}")]
    Configuration {
        /// Provider whose credential could not be resolved
        provider: &'static str,
        /// Why the credential was rejected
        reason: CredentialError,
    },

    /// User input failed one or more schema rules
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Network failure, timeout or connection error
    #[error("transport error ({provider}): {detail}")]
    Transport {
        /// Provider being called
        provider: &'static str,
        /// Transport-level detail (never contains URLs or secrets)
        detail: String,
    },

    /// Provider answered but reported an application-level failure
    #[error("provider error ({provider}): {kind}{}: {message}", status_suffix(.status))]
    Provider {
        /// Provider that reported the failure
        provider: &'static str,
        /// HTTP status when the failure came with a non-2xx response
        status: Option<u16>,
        /// Recognized failure kind
        kind: ProviderFailureKind,
        /// Provider's own message
        message: String,
    },

    /// Response body was not JSON or did not have the expected shape
    #[error("malformed response from {provider}: {detail}")]
    MalformedResponse {
        /// Provider that sent the response
        provider: &'static str,
        /// Parse or shape detail
        detail: String,
    },

    /// Anything not anticipated above (including caught panics)
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(", status {s}")).unwrap_or_default()
}

impl LookupError {
    /// Category this error is reported under.
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Configuration { .. } => FailureCategory::Configuration,
            Self::Validation(_) => FailureCategory::Validation,
            Self::Transport { .. } => FailureCategory::Transport,
            Self::Provider { .. } => FailureCategory::Provider,
            Self::MalformedResponse { .. } => FailureCategory::MalformedResponse,
            Self::Unexpected(_) => FailureCategory::Unexpected,
        }
    }

    /// Shorthand for a malformed-response error.
    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            detail: detail.into(),
        }
    }
}

/// One or more violated input rules.
///
/// Messages are kept in rule order and joined with `"; "` for display.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", .violations.join("; "))]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    /// Create a validation error from a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            violations: vec![message.into()],
        }
    }

    /// Record another violated rule.
    pub fn push(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    /// Whether any rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The individual violation messages.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Convert into `Err(self)` when violations were recorded, otherwise `Ok(value)`.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Application-level failure kinds a provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFailureKind {
    /// Query was understood but nothing matched
    NoMatch,
    /// Provider rejected the request parameters
    BadRequest,
    /// Too many requests
    RateLimited,
    /// Credential rejected or not subscribed
    AuthRejected,
    /// Account balance or quota exhausted
    QuotaExhausted,
    /// Any other provider-reported failure
    Other,
}

/// Known provider phrases, matched case-insensitively in order.
const KNOWN_PROVIDER_PHRASES: &[(&str, ProviderFailureKind)] = &[
    ("no matches found", ProviderFailureKind::NoMatch),
    ("cell not found", ProviderFailureKind::NoMatch),
    ("no records were found", ProviderFailureKind::NoMatch),
    ("rate limit", ProviderFailureKind::RateLimited),
    ("too many requests", ProviderFailureKind::RateLimited),
    ("invalid token", ProviderFailureKind::AuthRejected),
    ("invalid api key", ProviderFailureKind::AuthRejected),
    ("invalid key", ProviderFailureKind::AuthRejected),
    ("not subscribed", ProviderFailureKind::AuthRejected),
    ("unauthorized", ProviderFailureKind::AuthRejected),
    ("no balance", ProviderFailureKind::QuotaExhausted),
    ("quota", ProviderFailureKind::QuotaExhausted),
    ("invalid request", ProviderFailureKind::BadRequest),
    ("missing parameter", ProviderFailureKind::BadRequest),
];

impl ProviderFailureKind {
    /// Recognize a provider's free-text message from the known phrase table.
    #[must_use]
    pub fn from_provider_text(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        KNOWN_PROVIDER_PHRASES
            .iter()
            .find(|(phrase, _)| lowered.contains(phrase))
            .map(|(_, kind)| *kind)
    }

    /// Map a non-success HTTP status to a failure kind.
    ///
    /// A bare 404 is a request that addressed nothing; only provider text
    /// can say "no match".
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 | 404 | 422 => Some(Self::BadRequest),
            401 | 403 => Some(Self::AuthRejected),
            402 => Some(Self::QuotaExhausted),
            429 => Some(Self::RateLimited),
            _ => None,
        }
    }

    /// Classify from message text first, then from status, else `Other`.
    #[must_use]
    pub fn detect(text: &str, status: Option<u16>) -> Self {
        Self::from_provider_text(text)
            .or_else(|| status.and_then(Self::from_status))
            .unwrap_or(Self::Other)
    }

    /// Stable snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::BadRequest => "bad_request",
            Self::RateLimited => "rate_limited",
            Self::AuthRejected => "auth_rejected",
            Self::QuotaExhausted => "quota_exhausted",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProviderFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates returned by a provider fall outside the valid range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("coordinates out of range: latitude {latitude}, longitude {longitude}")]
pub struct CoordinateRangeError {
    /// Offending latitude
    pub latitude: f64,
    /// Offending longitude
    pub longitude: f64,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `LookupError`.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
