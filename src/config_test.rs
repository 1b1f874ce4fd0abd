use super::*;

#[test]
fn default_config_uses_viewer_key() {
    let config = ControllerConfig::default();
    assert_eq!(config.storage_key, "pdfjs.dark_mode");
    assert_eq!(config.default_mode, Mode::Auto);
    assert_eq!(config.style_element_id, "pdfjs-darkmode-style");
}

#[test]
fn from_json_fills_missing_fields() {
    let config = ControllerConfig::from_json(r#"{"storage_key": "viewer.theme"}"#).expect("parse");
    assert_eq!(config.storage_key, "viewer.theme");
    assert_eq!(config.default_mode, Mode::Auto);
    assert_eq!(config.style_element_id, DEFAULT_STYLE_ELEMENT_ID);
}

#[test]
fn from_json_reads_default_mode() {
    let config = ControllerConfig::from_json(r#"{"default_mode": "light"}"#).expect("parse");
    assert_eq!(config.default_mode, Mode::Light);
}

#[test]
fn from_json_rejects_unknown_mode() {
    assert!(ControllerConfig::from_json(r#"{"default_mode": "purple"}"#).is_err());
}

#[test]
fn from_json_empty_object_is_default() {
    let config = ControllerConfig::from_json("{}").expect("parse");
    assert_eq!(config, ControllerConfig::default());
}
