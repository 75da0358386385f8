//! Field-level rules shared by the schemas.
//!
//! Each rule records its violation into the shared [`ValidationError`] and
//! returns `None`, so a schema can check every field and report all problems
//! at once.

use once_cell::sync::Lazy;
use regex::Regex;
use sleuth_core::ValidationError;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Trimmed, non-empty text. Whitespace-only counts as missing.
pub(crate) fn required<'a>(
    value: Option<&'a str>,
    label: &str,
    errors: &mut ValidationError,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(format!("{label} is required"));
            None
        }
    }
}

/// Optional text: `None` for absent or blank values.
pub(crate) fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Character-count bounds, inclusive.
pub(crate) fn length_between(
    value: &str,
    label: &str,
    min: usize,
    max: usize,
    errors: &mut ValidationError,
) -> bool {
    let len = value.chars().count();
    if len < min {
        errors.push(format!("{label} must be at least {min} characters"));
        false
    } else if len > max {
        errors.push(format!("{label} must be at most {max} characters"));
        false
    } else {
        true
    }
}

/// Digits-only string with an inclusive length range.
pub(crate) fn digits(
    value: &str,
    label: &str,
    min: usize,
    max: usize,
    errors: &mut ValidationError,
) -> bool {
    if !DIGITS.is_match(value) {
        errors.push(format!("{label} must contain digits only"));
        return false;
    }
    if value.len() < min || value.len() > max {
        if min == max {
            errors.push(format!("{label} must be exactly {min} digits"));
        } else {
            errors.push(format!("{label} must be {min}-{max} digits"));
        }
        return false;
    }
    true
}

/// Coerce to a positive integer no larger than `max`.
pub(crate) fn positive_int(
    value: &str,
    label: &str,
    max: u32,
    errors: &mut ValidationError,
) -> Option<u32> {
    match value.parse::<u64>() {
        Ok(0) | Err(_) => {
            errors.push(format!("{label} must be a positive integer"));
            None
        }
        Ok(n) if n > u64::from(max) => {
            errors.push(format!("{label} must not exceed {max}"));
            None
        }
        Ok(n) => u32::try_from(n).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        let mut errors = ValidationError::default();
        assert_eq!(required(Some("  Dhaka "), "City", &mut errors), Some("Dhaka"));
        assert_eq!(required(Some("   "), "City", &mut errors), None);
        assert_eq!(required(None, "Name", &mut errors), None);
        assert_eq!(
            errors.violations(),
            &["City is required".to_string(), "Name is required".to_string()]
        );
    }

    #[test]
    fn test_digits_rules() {
        let mut errors = ValidationError::default();
        assert!(digits("880", "Country code", 1, 3, &mut errors));
        assert!(!digits("+880", "Country code", 1, 3, &mut errors));
        assert!(!digits("8801", "Country code", 1, 3, &mut errors));
        assert!(!digits("47", "MCC", 3, 3, &mut errors));
        assert_eq!(
            errors.violations(),
            &[
                "Country code must contain digits only".to_string(),
                "Country code must be 1-3 digits".to_string(),
                "MCC must be exactly 3 digits".to_string(),
            ]
        );
    }

    #[test]
    fn test_positive_int_coercion() {
        let mut errors = ValidationError::default();
        assert_eq!(positive_int("12345", "LAC", 65_535, &mut errors), Some(12_345));
        assert_eq!(positive_int("0", "LAC", 65_535, &mut errors), None);
        assert_eq!(positive_int("-4", "LAC", 65_535, &mut errors), None);
        assert_eq!(positive_int("12.5", "LAC", 65_535, &mut errors), None);
        assert_eq!(positive_int("70000", "LAC", 65_535, &mut errors), None);
        assert_eq!(errors.violations().len(), 4);
        assert_eq!(errors.violations()[3], "LAC must not exceed 65535");
    }

    #[test]
    fn test_length_between_counts_chars() {
        let mut errors = ValidationError::default();
        assert!(length_between("Zoë", "Name", 2, 3, &mut errors));
        assert!(!length_between("Z", "Name", 2, 3, &mut errors));
        assert!(errors.violations()[0].contains("at least 2"));
    }
}
