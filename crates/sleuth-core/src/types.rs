//! Normalized payloads shared by every lookup tool.
//!
//! These are the only success shapes the presentation layer ever sees.
//! Optional fields are serialized as `null`, never omitted, so every declared
//! key is always present.

use crate::error::CoordinateRangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lookup tools offered by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Name + city person lookup
    PersonSearch,
    /// Face / reverse-image search by upload
    FaceSearch,
    /// Phone number caller-ID lookup
    CallerId,
    /// Visual match by image URL
    VisualMatch,
    /// Cell-tower geolocation
    CellLookup,
}

impl ToolKind {
    /// All tools, in display order.
    pub const ALL: [Self; 5] = [
        Self::PersonSearch,
        Self::FaceSearch,
        Self::CallerId,
        Self::VisualMatch,
        Self::CellLookup,
    ];

    /// Stable snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PersonSearch => "person_search",
            Self::FaceSearch => "face_search",
            Self::CallerId => "caller_id",
            Self::VisualMatch => "visual_match",
            Self::CellLookup => "cell_lookup",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radio access technology of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radio {
    /// 2G
    #[default]
    Gsm,
    /// 3G
    Umts,
    /// 4G
    Lte,
    /// 5G
    Nr,
    /// CDMA networks
    Cdma,
}

impl Radio {
    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gsm => "gsm",
            Self::Umts => "umts",
            Self::Lte => "lte",
            Self::Nr => "nr",
            Self::Cdma => "cdma",
        }
    }
}

impl FromStr for Radio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gsm" | "2g" => Ok(Self::Gsm),
            "umts" | "wcdma" | "3g" => Ok(Self::Umts),
            "lte" | "4g" => Ok(Self::Lte),
            "nr" | "5g" => Ok(Self::Nr),
            "cdma" => Ok(Self::Cdma),
            other => Err(format!("unknown radio type '{other}'")),
        }
    }
}

/// One hit from a face or visual-match search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    /// Page or image URL where the match was found
    pub url: String,
    /// Page title, when the provider supplies one
    pub title: Option<String>,
    /// Source site name, when the provider supplies one
    pub source: Option<String>,
    /// Confidence 0-100, when the provider scores matches
    pub score: Option<f64>,
    /// Thumbnail URL (or data URI); may be absent
    pub thumbnail: Option<String>,
}

impl MatchItem {
    /// Create a match with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            source: None,
            score: None,
            thumbnail: None,
        }
    }

    /// Clamp a raw provider score into 0-100; non-finite scores are dropped.
    #[must_use]
    pub fn normalize_score(raw: f64) -> Option<f64> {
        raw.is_finite().then(|| raw.clamp(0.0, 100.0))
    }
}

/// A single geolocation fix for a cell tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoFix {
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
    /// Accuracy radius in meters (>= 0), when known
    pub accuracy_meters: Option<f64>,
    /// Google Maps deep link for the coordinates
    pub map_url: String,
    /// Reverse-geocoded address, when the provider supplies one
    pub address: Option<String>,
}

impl GeoFix {
    /// Build a fix, enforcing coordinate ranges.
    ///
    /// A negative or non-finite accuracy is dropped to `None`.
    ///
    /// # Errors
    /// Returns error if either coordinate is non-finite or out of range.
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_meters: Option<f64>,
    ) -> Result<Self, CoordinateRangeError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(CoordinateRangeError {
                latitude,
                longitude,
            });
        }

        let accuracy_meters = accuracy_meters.filter(|a| a.is_finite() && *a >= 0.0);

        Ok(Self {
            latitude,
            longitude,
            accuracy_meters,
            map_url: format!("https://www.google.com/maps?q={latitude},{longitude}"),
            address: None,
        })
    }

    /// Attach a reverse-geocoded address.
    #[must_use]
    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address.filter(|a| !a.trim().is_empty());
        self
    }
}

/// Summary of one person record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    /// Full name as the provider records it
    pub full_name: Option<String>,
    /// Current job title
    pub job_title: Option<String>,
    /// Current employer
    pub job_company: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// `LinkedIn` profile URL
    pub linkedin_url: Option<String>,
    /// Sex, as reported
    pub sex: Option<String>,
    /// Birth year, as reported
    pub birth_year: Option<u16>,
    /// Known email addresses
    pub emails: Vec<String>,
    /// Known phone numbers
    pub phone_numbers: Vec<String>,
}

/// Person search payload. `found == false` means the provider had no record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSearchOutcome {
    /// Whether a record matched
    pub found: bool,
    /// Provider match likelihood (1-10), when reported
    pub likelihood: Option<u8>,
    /// The matched record
    pub profile: Option<PersonProfile>,
}

impl PersonSearchOutcome {
    /// No record matched.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            found: false,
            likelihood: None,
            profile: None,
        }
    }
}

/// Face search payload, sorted by descending score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceSearchOutcome {
    /// Matches found
    pub matches: Vec<MatchItem>,
}

/// Visual match payload, in provider order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMatchOutcome {
    /// Matches found
    pub matches: Vec<MatchItem>,
}

/// Caller-ID payload. `found == false` means the provider knew no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdOutcome {
    /// Queried number in E.164 form
    pub number: String,
    /// Whether a name was found
    pub found: bool,
    /// Best-known name
    pub name: Option<String>,
    /// Other names reported for the number
    pub other_names: Vec<String>,
}

impl CallerIdOutcome {
    /// No name known for `number`.
    pub fn not_found(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            found: false,
            name: None,
            other_names: Vec::new(),
        }
    }
}
