//! Configuration tests
//!
//! The template round-trip tests guard against the generated TOML drifting
//! from what the deserialization layer accepts: adding a config field
//! without wiring it into both places fails here.

use super::*;

#[test]
fn test_config_template_round_trips() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config template should parse back.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_template_values_survive_round_trip() {
    let mut config = Config::default();
    config.api_url = "https://catalog.example.com/v2".to_string();
    config.page_size = 25;
    config.logging.level = "debug".to_string();
    config.audit.enabled = false;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(
        parsed.api_url.as_deref(),
        Some("https://catalog.example.com/v2")
    );
    assert_eq!(parsed.page_size, Some(25));
    assert_eq!(parsed.logging.unwrap().level.as_deref(), Some("debug"));
    assert_eq!(parsed.audit.unwrap().enabled, Some(false));
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let parsed: FileConfig = toml::from_str("api_url = \"http://localhost:3000\"").unwrap();
    let logging = LoggingConfig::from_file(parsed.logging);
    let audit = AuditConfig::from_file(parsed.audit);

    assert_eq!(logging.level, "info");
    assert!(!logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Daily);
    assert!(audit.enabled);
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
    // Unknown values fall back to daily rather than failing startup
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
