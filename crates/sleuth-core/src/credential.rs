//! Provider credentials.
//!
//! Credentials are opaque secrets resolved by the caller (usually from the
//! process environment) and handed to the engine as plain values. Nothing in
//! the lookup path reads ambient configuration on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Values shipped in sample `.env` files that must never reach a provider.
const PLACEHOLDER_VALUES: &[&str] = &[
    "your_api_key_here",
    "your-api-key-here",
    "your_api_key",
    "your-api-key",
    "api_key",
    "api-key",
    "<api_key>",
    "<api-key>",
    "<your_api_key>",
    "changeme",
    "change_me",
    "replace_me",
    "replace-me",
    "todo",
    "xxx",
    "xxxx",
    "none",
    "null",
];

/// Why a credential was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// No value configured
    #[error("credential is not configured")]
    Missing,

    /// Value is empty or whitespace only
    #[error("credential is empty")]
    Empty,

    /// Value is a known placeholder string
    #[error("credential is a placeholder value")]
    Placeholder,
}

/// A resolved provider secret.
///
/// The inner string is zeroed on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Resolve a raw configuration value into a usable key.
    ///
    /// # Errors
    /// Returns error if the value is absent, blank or a recognized placeholder.
    pub fn resolve(value: Option<&str>) -> Result<Self, CredentialError> {
        let value = value.ok_or(CredentialError::Missing)?.trim();

        if value.is_empty() {
            return Err(CredentialError::Empty);
        }

        if is_placeholder(value) {
            return Err(CredentialError::Placeholder);
        }

        Ok(Self(Zeroizing::new(value.to_string())))
    }

    /// The secret itself, for placing into an outbound request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([redacted])")
    }
}

fn is_placeholder(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    PLACEHOLDER_VALUES.contains(&lowered.as_str())
        || lowered.starts_with("your_")
        || lowered.starts_with("your-")
        || lowered.chars().all(|c| c == 'x' || c == '*')
}

/// Which credential a provider needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSlot {
    /// `FaceCheck` upload API key
    FaceCheck,
    /// `PeopleDataLabs` API key
    PeopleDataLabs,
    /// Shared `RapidAPI` key (caller ID, visual match)
    RapidApi,
    /// `OpenCellID` access token
    OpenCellId,
    /// Unwired Labs token
    UnwiredLabs,
}

impl CredentialSlot {
    /// Environment variable conventionally holding this credential.
    #[must_use]
    pub fn env_var(self) -> &'static str {
        match self {
            Self::FaceCheck => "FACECHECK_API_KEY",
            Self::PeopleDataLabs => "PDL_API_KEY",
            Self::RapidApi => "RAPIDAPI_KEY",
            Self::OpenCellId => "OPENCELLID_API_KEY",
            Self::UnwiredLabs => "UNWIREDLABS_API_KEY",
        }
    }
}

/// Raw, unresolved credential values for every provider.
///
/// Resolution into [`ApiKey`] happens per request so a missing key only fails
/// the tools that need it.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    facecheck: Option<String>,
    people_data_labs: Option<String>,
    rapidapi: Option<String>,
    opencellid: Option<String>,
    unwiredlabs: Option<String>,
}

impl Credentials {
    /// Empty credential set (every lookup will fail with a configuration error).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every credential from its conventional environment variable.
    ///
    /// This is a caller-side convenience; the engine only ever receives the
    /// resulting value.
    #[must_use]
    pub fn from_env() -> Self {
        let mut credentials = Self::default();
        for slot in [
            CredentialSlot::FaceCheck,
            CredentialSlot::PeopleDataLabs,
            CredentialSlot::RapidApi,
            CredentialSlot::OpenCellId,
            CredentialSlot::UnwiredLabs,
        ] {
            if let Ok(value) = std::env::var(slot.env_var()) {
                tracing::debug!("Loaded credential for {:?} from {}", slot, slot.env_var());
                credentials.set(slot, value);
            }
        }
        credentials
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, slot: CredentialSlot, value: impl Into<String>) -> Self {
        self.set(slot, value);
        self
    }

    /// Set the raw value for a slot.
    pub fn set(&mut self, slot: CredentialSlot, value: impl Into<String>) {
        *self.slot_mut(slot) = Some(value.into());
    }

    /// Raw value for a slot, if any.
    #[must_use]
    pub fn raw(&self, slot: CredentialSlot) -> Option<&str> {
        match slot {
            CredentialSlot::FaceCheck => self.facecheck.as_deref(),
            CredentialSlot::PeopleDataLabs => self.people_data_labs.as_deref(),
            CredentialSlot::RapidApi => self.rapidapi.as_deref(),
            CredentialSlot::OpenCellId => self.opencellid.as_deref(),
            CredentialSlot::UnwiredLabs => self.unwiredlabs.as_deref(),
        }
    }

    /// Resolve the key for a slot.
    ///
    /// # Errors
    /// Returns error if the slot is unset, blank or a placeholder.
    pub fn resolve(&self, slot: CredentialSlot) -> Result<ApiKey, CredentialError> {
        ApiKey::resolve(self.raw(slot))
    }

    fn slot_mut(&mut self, slot: CredentialSlot) -> &mut Option<String> {
        match slot {
            CredentialSlot::FaceCheck => &mut self.facecheck,
            CredentialSlot::PeopleDataLabs => &mut self.people_data_labs,
            CredentialSlot::RapidApi => &mut self.rapidapi,
            CredentialSlot::OpenCellId => &mut self.opencellid,
            CredentialSlot::UnwiredLabs => &mut self.unwiredlabs,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |v: &Option<String>| if v.is_some() { "set" } else { "unset" };
        f.debug_struct("Credentials")
            .field("facecheck", &state(&self.facecheck))
            .field("people_data_labs", &state(&self.people_data_labs))
            .field("rapidapi", &state(&self.rapidapi))
            .field("opencellid", &state(&self.opencellid))
            .field("unwiredlabs", &state(&self.unwiredlabs))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_valid_key() {
        let key = ApiKey::resolve(Some("  pk_live_8f2a91  ")).expect("resolve key");
        assert_eq!(key.expose(), "pk_live_8f2a91");
    }

    #[test]
    fn test_resolve_rejects_missing_and_empty() {
        assert_eq!(
            ApiKey::resolve(None).unwrap_err(),
            CredentialError::Missing
        );
        assert_eq!(
            ApiKey::resolve(Some("   ")).unwrap_err(),
            CredentialError::Empty
        );
    }

    #[test]
    fn test_resolve_rejects_placeholders() {
        for value in ["your_api_key_here", "YOUR_API_KEY", "changeme", "xxxxxxxx", "<api_key>"] {
            assert_eq!(
                ApiKey::resolve(Some(value)).unwrap_err(),
                CredentialError::Placeholder,
                "{value} should be treated as a placeholder"
            );
        }
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let key = ApiKey::resolve(Some("s3cr3t-value")).expect("resolve key");
        assert!(!format!("{key:?}").contains("s3cr3t"));

        let creds = Credentials::new().with(CredentialSlot::RapidApi, "s3cr3t-value");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("rapidapi: \"set\""));
    }

    #[test]
    fn test_credentials_slots() {
        let creds = Credentials::new()
            .with(CredentialSlot::OpenCellId, "pk.123")
            .with(CredentialSlot::UnwiredLabs, "");

        assert_eq!(
            creds.resolve(CredentialSlot::OpenCellId).expect("resolve").expose(),
            "pk.123"
        );
        assert_eq!(
            creds.resolve(CredentialSlot::UnwiredLabs).unwrap_err(),
            CredentialError::Empty
        );
        assert_eq!(
            creds.resolve(CredentialSlot::FaceCheck).unwrap_err(),
            CredentialError::Missing
        );
    }
}
