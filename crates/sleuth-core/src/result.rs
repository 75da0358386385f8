//! The discriminated result handed to the presentation layer.
//!
//! Every orchestration entry point resolves to a [`LookupResult`]. It
//! serializes to `{"success": true, "data": ...}` or
//! `{"success": false, "category": ..., "error": ..., "message": ...}`, so the
//! `success` flag always agrees with which half is populated.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

/// Fixed set of failure categories, in classification precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Credential missing or placeholder
    Configuration,
    /// Input failed schema rules
    Validation,
    /// Network or timeout failure
    Transport,
    /// Provider reported an application-level error
    Provider,
    /// Response was not JSON or had an unexpected shape
    MalformedResponse,
    /// Anything else
    Unexpected,
}

impl FailureCategory {
    /// Stable snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Provider => "provider",
            Self::MalformedResponse => "malformed_response",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure half of a [`LookupResult`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Failure {
    /// Machine-checkable category
    pub category: FailureCategory,
    /// Internal diagnostic, never shown to end users verbatim
    pub error: String,
    /// User-facing message
    pub message: String,
}

impl Failure {
    /// Create a new failure.
    pub fn new(
        category: FailureCategory,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Normalized outcome of one lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<T> {
    /// Lookup succeeded with a normalized payload
    Success(T),
    /// Lookup failed; see [`Failure`]
    Failure(Failure),
}

impl<T> LookupResult<T> {
    /// Whether this is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the success payload.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the failure.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(failure) => Err(failure),
        }
    }

    /// Map the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LookupResult<U> {
        match self {
            Self::Success(data) => LookupResult::Success(f(data)),
            Self::Failure(failure) => LookupResult::Failure(failure),
        }
    }
}

impl<T> From<Failure> for LookupResult<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl<T: Serialize> Serialize for LookupResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            Self::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("category", &failure.category)?;
                map.serialize_entry("error", &failure.error)?;
                map.serialize_entry("message", &failure.message)?;
                map.end()
            }
        }
    }
}
