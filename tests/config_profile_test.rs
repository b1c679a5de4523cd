use farmdesk::config::{BackendSettings, TomlProfile, DEFAULT_TIMEOUT_SECONDS};
use farmdesk::utils::validation::Validate;
use std::io::Write;

#[test]
fn profile_file_loads_and_validates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[backend]
base_url = "https://api.example.com"
project_id = "proj-123"
public_key = "pk-456"
timeout_seconds = 15
"#
    )
    .unwrap();

    let profile = TomlProfile::from_file(file.path()).unwrap();
    let settings: BackendSettings = profile.into();

    assert_eq!(settings.timeout_seconds, 15);
    assert!(settings.validate().is_ok());
}

#[test]
fn profile_without_timeout_uses_default() {
    let profile = TomlProfile::from_str(
        r#"
[backend]
base_url = "https://api.example.com"
project_id = "proj-123"
public_key = "pk-456"
"#,
    )
    .unwrap();

    let settings: BackendSettings = profile.into();
    assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
}

#[test]
fn missing_profile_file_is_an_error() {
    assert!(TomlProfile::from_file("/nonexistent/farmdesk.toml").is_err());
}

#[test]
fn invalid_settings_fail_validation() {
    let settings = BackendSettings {
        base_url: "not a url".to_string(),
        project_id: "proj".to_string(),
        public_key: "pk".to_string(),
        timeout_seconds: 30,
    };
    assert!(settings.validate().is_err());
}
