//! One schema per lookup tool.

use crate::image::{is_data_uri, parse_http_url, parse_image_reference, ImageSource};
use crate::raw::{RawCallerId, RawCellLookup, RawFaceSearch, RawPersonSearch, RawVisualMatch};
use crate::rules::{digits, length_between, optional, positive_int, required};
use sleuth_core::{AppConfig, Radio, ValidationError};
use url::Url;

/// Largest LAC representable in the 16-bit field.
pub const MAX_LAC: u32 = 65_535;
/// Largest cell identity (28-bit LTE ECI).
pub const MAX_CELL_ID: u32 = 268_435_455;

/// Settings a schema needs beyond the raw input itself.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// MCC applied when a cell lookup omits one
    pub default_mcc: String,
    /// Radio applied when a cell lookup omits one
    pub default_radio: Radio,
    /// Largest decoded upload accepted
    pub max_image_bytes: usize,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ValidationContext {
    /// Derive the context from application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_mcc: config.cell.default_mcc.clone(),
            default_radio: config.cell.default_radio,
            max_image_bytes: config.limits.max_image_bytes,
        }
    }
}

/// Validated person search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    full_name: String,
    city: String,
    country: Option<String>,
}

impl PersonQuery {
    /// Full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// City.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Country, if given.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Validate a person search.
pub fn validate_person_search(raw: &RawPersonSearch) -> Result<PersonQuery, ValidationError> {
    let mut errors = ValidationError::default();

    let full_name = required(raw.full_name.as_deref(), "Full name", &mut errors)
        .filter(|name| length_between(name, "Full name", 2, 100, &mut errors))
        .filter(|name| {
            let has_letter = name.chars().any(char::is_alphabetic);
            if !has_letter {
                errors.push("Full name must contain letters");
            }
            has_letter
        });

    let city = required(raw.city.as_deref(), "City", &mut errors)
        .filter(|city| length_between(city, "City", 2, 80, &mut errors));

    let country = optional(raw.country.as_deref());
    if let Some(country) = country {
        length_between(country, "Country", 2, 56, &mut errors);
    }

    match (full_name, city) {
        (Some(full_name), Some(city)) if errors.is_empty() => Ok(PersonQuery {
            full_name: full_name.to_string(),
            city: city.to_string(),
            country: country.map(str::to_string),
        }),
        _ => Err(errors),
    }
}

/// Validated face search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceQuery {
    image: ImageSource,
}

impl FaceQuery {
    /// The image to search with.
    #[must_use]
    pub fn image(&self) -> &ImageSource {
        &self.image
    }
}

/// Validate a face search.
pub fn validate_face_search(
    raw: &RawFaceSearch,
    ctx: &ValidationContext,
) -> Result<FaceQuery, ValidationError> {
    let mut errors = ValidationError::default();

    let image = required(raw.image.as_deref(), "Image", &mut errors).and_then(|value| {
        parse_image_reference(value, ctx.max_image_bytes)
            .map_err(|message| errors.push(message))
            .ok()
    });

    match image {
        Some(image) => Ok(FaceQuery { image }),
        None => Err(errors),
    }
}

/// Validated caller-ID lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdQuery {
    country_code: String,
    national_number: String,
}

impl CallerIdQuery {
    /// Country calling code without `+`.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// National significant number.
    #[must_use]
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// The number in E.164 form.
    #[must_use]
    pub fn e164(&self) -> String {
        format!("+{}{}", self.country_code, self.national_number)
    }
}

/// Validate a caller-ID lookup.
pub fn validate_caller_id(raw: &RawCallerId) -> Result<CallerIdQuery, ValidationError> {
    let mut errors = ValidationError::default();

    let country_code = required(raw.country_code.as_deref(), "Country code", &mut errors)
        .filter(|code| digits(code, "Country code", 1, 3, &mut errors));

    let national_number = required(raw.national_number.as_deref(), "Phone number", &mut errors)
        .filter(|number| digits(number, "Phone number", 4, 14, &mut errors));

    if let (Some(code), Some(number)) = (country_code, national_number) {
        if code.len() + number.len() > 15 {
            errors.push("Phone number must not exceed 15 digits including the country code");
        }
    }

    match (country_code, national_number) {
        (Some(code), Some(number)) if errors.is_empty() => Ok(CallerIdQuery {
            country_code: code.to_string(),
            national_number: number.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Validated visual match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualQuery {
    image_url: Url,
}

impl VisualQuery {
    /// Image URL to match.
    #[must_use]
    pub fn image_url(&self) -> &Url {
        &self.image_url
    }
}

/// Validate a visual match. Only remote URLs are accepted.
pub fn validate_visual_match(raw: &RawVisualMatch) -> Result<VisualQuery, ValidationError> {
    let mut errors = ValidationError::default();

    let image_url = required(raw.image_url.as_deref(), "Image URL", &mut errors).and_then(|value| {
        if is_data_uri(value) {
            errors.push("Visual match requires an http(s) image URL, not a data URI");
            return None;
        }
        parse_http_url(value).map_err(|message| errors.push(message)).ok()
    });

    match image_url {
        Some(image_url) => Ok(VisualQuery { image_url }),
        None => Err(errors),
    }
}

/// Validated cell-tower lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellQuery {
    mcc: String,
    mnc: String,
    lac: u32,
    cell_id: u32,
    radio: Radio,
}

impl CellQuery {
    /// Mobile country code (3 digits).
    #[must_use]
    pub fn mcc(&self) -> &str {
        &self.mcc
    }

    /// Mobile network code, leading zeros preserved.
    #[must_use]
    pub fn mnc(&self) -> &str {
        &self.mnc
    }

    /// Location area code.
    #[must_use]
    pub fn lac(&self) -> u32 {
        self.lac
    }

    /// Cell identifier.
    #[must_use]
    pub fn cell_id(&self) -> u32 {
        self.cell_id
    }

    /// Radio type.
    #[must_use]
    pub fn radio(&self) -> Radio {
        self.radio
    }
}

/// Validate a cell-tower lookup.
pub fn validate_cell_lookup(
    raw: &RawCellLookup,
    ctx: &ValidationContext,
) -> Result<CellQuery, ValidationError> {
    let mut errors = ValidationError::default();

    let mcc = optional(raw.mcc.as_deref()).unwrap_or(ctx.default_mcc.as_str());
    let mcc_ok = digits(mcc, "Country code (MCC)", 3, 3, &mut errors);

    let mnc = required(raw.mnc.as_deref(), "Operator code (MNC)", &mut errors)
        .filter(|mnc| digits(mnc, "Operator code (MNC)", 1, 3, &mut errors));

    let lac = required(raw.lac.as_deref(), "LAC", &mut errors)
        .and_then(|lac| positive_int(lac, "LAC", MAX_LAC, &mut errors));

    let cell_id = required(raw.cell_id.as_deref(), "Cell ID", &mut errors)
        .and_then(|cid| positive_int(cid, "Cell ID", MAX_CELL_ID, &mut errors));

    let radio = match optional(raw.radio.as_deref()) {
        None => Some(ctx.default_radio),
        Some(value) => value
            .parse::<Radio>()
            .map_err(|_| errors.push("Radio must be one of gsm, umts, lte, nr, cdma"))
            .ok(),
    };

    match (mnc, lac, cell_id, radio) {
        (Some(mnc), Some(lac), Some(cell_id), Some(radio)) if mcc_ok && errors.is_empty() => {
            Ok(CellQuery {
                mcc: mcc.to_string(),
                mnc: mnc.to_string(),
                lac,
                cell_id,
                radio,
            })
        }
        _ => Err(errors),
    }
}
