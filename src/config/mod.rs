pub mod profile;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};

pub use profile::{BackendProfile, TomlProfile};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Resolved backend connection settings, from CLI flags or a TOML profile.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
    pub timeout_seconds: u64,
}

impl ConfigProvider for BackendSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn public_key(&self) -> &str {
        &self.public_key
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for BackendSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("project_id", &self.project_id)?;
        validate_non_empty_string("public_key", &self.public_key)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl From<TomlProfile> for BackendSettings {
    fn from(profile: TomlProfile) -> Self {
        Self {
            base_url: profile.backend.base_url,
            project_id: profile.backend.project_id,
            public_key: profile.backend.public_key,
            timeout_seconds: profile
                .backend
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "farmdesk")]
    #[command(about = "Farm records over a hosted table store")]
    pub struct CliConfig {
        #[arg(long, default_value = "https://api.apper.example")]
        pub base_url: String,

        #[arg(long, default_value = "")]
        pub project_id: String,

        #[arg(long, default_value = "")]
        pub public_key: String,

        /// TOML profile file; when given it overrides the connection flags.
        #[arg(long)]
        pub profile: Option<String>,

        #[arg(long, default_value = "30")]
        pub timeout_seconds: u64,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Resolves and validates the backend settings this invocation
        /// should use.
        pub fn backend(&self) -> Result<BackendSettings> {
            let settings = match &self.profile {
                Some(path) => TomlProfile::from_file(path)?.into(),
                None => BackendSettings {
                    base_url: self.base_url.clone(),
                    project_id: self.project_id.clone(),
                    public_key: self.public_key.clone(),
                    timeout_seconds: self.timeout_seconds,
                },
            };
            settings.validate()?;
            Ok(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BackendSettings {
        BackendSettings {
            base_url: "https://api.example.com".to_string(),
            project_id: "proj-1".to_string(),
            public_key: "pk-1".to_string(),
            timeout_seconds: 30,
        }
    }

    #[test]
    fn valid_settings_pass_validation() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn empty_project_id_is_rejected() {
        let mut s = settings();
        s.project_id = "  ".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let mut s = settings();
        s.base_url = "ftp://api.example.com".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn profile_conversion_defaults_timeout() {
        let profile = TomlProfile {
            backend: BackendProfile {
                base_url: "https://api.example.com".to_string(),
                project_id: "proj-1".to_string(),
                public_key: "pk-1".to_string(),
                timeout_seconds: None,
            },
        };
        let s: BackendSettings = profile.into();
        assert_eq!(s.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }
}
