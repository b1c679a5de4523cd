use crate::utils::error::{FarmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML connection profile:
///
/// ```toml
/// [backend]
/// base_url = "https://api.apper.example"
/// project_id = "proj-123"
/// public_key = "pk-456"
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlProfile {
    pub backend: BackendProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendProfile {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
    pub timeout_seconds: Option<u64>,
}

impl TomlProfile {
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FarmError::InvalidConfig {
            field: "profile".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_profile() {
        let profile = TomlProfile::from_str(
            r#"
[backend]
base_url = "https://api.example.com"
project_id = "proj-123"
public_key = "pk-456"
timeout_seconds = 10
"#,
        )
        .unwrap();

        assert_eq!(profile.backend.base_url, "https://api.example.com");
        assert_eq!(profile.backend.project_id, "proj-123");
        assert_eq!(profile.backend.timeout_seconds, Some(10));
    }

    #[test]
    fn timeout_is_optional() {
        let profile = TomlProfile::from_str(
            r#"
[backend]
base_url = "https://api.example.com"
project_id = "proj-123"
public_key = "pk-456"
"#,
        )
        .unwrap();
        assert_eq!(profile.backend.timeout_seconds, None);
    }

    #[test]
    fn missing_section_is_an_error() {
        let err = TomlProfile::from_str("base_url = \"x\"").unwrap_err();
        assert!(matches!(err, FarmError::InvalidConfig { .. }));
    }
}
