//! Raw, unvalidated input as the presentation layer produces it.
//!
//! Every field is optional so that a missing field surfaces as a "required"
//! violation instead of a deserialization error. Identifier fields accept
//! either JSON strings or JSON numbers.

use serde::{Deserialize, Deserializer};

/// Raw person search form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPersonSearch {
    /// Full name
    pub full_name: Option<String>,
    /// City
    pub city: Option<String>,
    /// Country (optional)
    pub country: Option<String>,
}

/// Raw face search form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFaceSearch {
    /// Data URI or http(s) URL
    #[serde(alias = "imageUrl", alias = "imageData")]
    pub image: Option<String>,
}

/// Raw caller-ID form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCallerId {
    /// Country calling code, digits only
    #[serde(deserialize_with = "lenient_string")]
    pub country_code: Option<String>,
    /// National number, digits only
    #[serde(deserialize_with = "lenient_string", alias = "number")]
    pub national_number: Option<String>,
}

/// Raw visual match form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawVisualMatch {
    /// Image URL
    #[serde(alias = "url")]
    pub image_url: Option<String>,
}

/// Raw cell-tower lookup form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCellLookup {
    /// Mobile country code; configured default when absent
    #[serde(deserialize_with = "lenient_string")]
    pub mcc: Option<String>,
    /// Mobile network (operator) code
    #[serde(deserialize_with = "lenient_string", alias = "operator")]
    pub mnc: Option<String>,
    /// Location area code
    #[serde(deserialize_with = "lenient_string")]
    pub lac: Option<String>,
    /// Cell identifier
    #[serde(deserialize_with = "lenient_string", alias = "cellid", alias = "cid")]
    pub cell_id: Option<String>,
    /// Radio type; configured default when absent
    pub radio: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Unsigned(n) => n.to_string(),
            StringOrNumber::Signed(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_lookup_accepts_numbers_and_strings() {
        let raw: RawCellLookup =
            serde_json::from_value(json!({ "lac": 12345, "cellId": 6789, "mnc": "02" }))
                .expect("deserialize raw cell lookup");
        assert_eq!(raw.lac.as_deref(), Some("12345"));
        assert_eq!(raw.cell_id.as_deref(), Some("6789"));
        assert_eq!(raw.mnc.as_deref(), Some("02"));
        assert!(raw.mcc.is_none());
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let raw: RawPersonSearch =
            serde_json::from_value(json!({})).expect("deserialize empty person search");
        assert!(raw.full_name.is_none());
        assert!(raw.city.is_none());
    }

    #[test]
    fn test_aliases() {
        let raw: RawCallerId = serde_json::from_value(json!({ "countryCode": 880, "number": "1711000000" }))
            .expect("deserialize caller id");
        assert_eq!(raw.country_code.as_deref(), Some("880"));
        assert_eq!(raw.national_number.as_deref(), Some("1711000000"));

        let raw: RawFaceSearch = serde_json::from_value(json!({ "imageUrl": "https://x.test/a.jpg" }))
            .expect("deserialize face search");
        assert_eq!(raw.image.as_deref(), Some("https://x.test/a.jpg"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result: Result<RawCellLookup, _> = serde_json::from_value(json!({ "lac": [1, 2] }));
        assert!(result.is_err());
    }
}
