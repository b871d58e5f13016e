use std::io::Write;

use gandi_ldns::config::{FileSettings, Settings};
use gandi_ldns::Error;

#[test]
fn test_file_settings_layered_under_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_key = "file-key"
domain = "example.com"
subdomain = "vpn"
ttl = 600
ip_url = "http://127.0.0.1:9/ip"
"#
    )
    .unwrap();

    let file_settings = FileSettings::read(file.path()).unwrap();
    let settings = Settings::from_sources(file_settings, |key: &str| match key {
        "TTL" => Some("900".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(settings.api_key.expose(), "file-key");
    assert_eq!(settings.record_name(), "vpn");
    assert_eq!(settings.ttl, 900);
    assert_eq!(settings.ip_url, "http://127.0.0.1:9/ip");
}

#[test]
fn test_unknown_key_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "domian = \"example.com\"").unwrap();

    let err = FileSettings::read(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}
