use serde_json::json;
use sleuth_core::{AppConfig, Radio};
use sleuth_validate::{
    validate_cell_lookup, validate_face_search, ImageSource, RawCellLookup, RawFaceSearch,
    ValidationContext,
};

#[test]
fn test_context_follows_config() {
    let mut config = AppConfig::default();
    config.cell.default_mcc = "310".to_string();
    config.cell.default_radio = Radio::Lte;
    config.limits.max_image_bytes = 4;

    let context = ValidationContext::from_config(&config);

    let raw: RawCellLookup =
        serde_json::from_value(json!({"operator": 260, "lac": "7033", "cid": 17811}))
            .expect("raw cell lookup");
    let query = validate_cell_lookup(&raw, &context).expect("valid query");
    assert_eq!(query.mcc(), "310");
    assert_eq!(query.mnc(), "260");
    assert_eq!(query.radio(), Radio::Lte);

    // "iVBORw0KGgo=" decodes to 8 bytes
    let raw = RawFaceSearch {
        image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
    };
    let err = validate_face_search(&raw, &context).unwrap_err();
    assert!(err.to_string().contains("too large"), "{err}");
}

#[test]
fn test_face_search_accepts_remote_url() {
    let raw: RawFaceSearch =
        serde_json::from_value(json!({"imageUrl": "https://example.com/face.jpg"}))
            .expect("raw face search");
    let query = validate_face_search(&raw, &ValidationContext::default()).expect("valid query");
    assert!(matches!(query.image(), ImageSource::Remote(url) if url.host_str() == Some("example.com")));
}
