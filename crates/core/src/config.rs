//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LINKQR_*` environment variables (nested keys use `__`).

use crate::error::{CoreError, CoreResult};
use crate::validation;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config files probed when no explicit path is given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["linkqr.toml", "config/linkqr.toml"];

/// Connection settings for the linkqr backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://links.example.com`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix of the versioned API
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Path of the login surface
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Request timeout in seconds; unset means requests may wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_user_agent() -> String {
    concat!("linkqr/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            login_path: default_login_path(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// When `path` is given the file must exist; otherwise the default
    /// locations are probed and skipped if absent.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                for candidate in DEFAULT_CONFIG_PATHS {
                    if Path::new(candidate).exists() {
                        builder = builder.add_source(File::with_name(candidate).required(false));
                    }
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("LINKQR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(base_url = %config.base_url, "Loaded client configuration");
        Ok(config)
    }

    /// Check that the configured values are usable
    pub fn validate(&self) -> CoreResult<()> {
        validation::validate_url(&self.base_url, "base_url")?;
        for (field, value) in [
            ("api_prefix", &self.api_prefix),
            ("login_path", &self.login_path),
        ] {
            if !value.starts_with('/') {
                return Err(CoreError::invalid_config(format!(
                    "{field} must start with '/', got '{value}'"
                )));
            }
        }
        validation::validate_not_empty(&self.user_agent, "user_agent")?;
        Ok(())
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://links.example.com\"\ntimeout_secs = 30"
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://links.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_load_rejects_invalid_base_url() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"not a url\"").unwrap();

        let result = ClientConfig::load(Some(file.path()));
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn test_relative_paths_required() {
        let config = ClientConfig {
            login_path: "login".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = ClientConfig {
            timeout_secs: Some(0),
            ..ClientConfig::default()
        };
        assert_eq!(config.timeout(), None);
    }
}
