//! Configuration management for cfl.
//!
//! Parses `cfl.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.password`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override Confluence username.
    pub username: Option<String>,
    /// Override Confluence password or API token.
    pub password: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cfl.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection settings.
    pub confluence: Option<ConfluenceConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection settings.
///
/// Credentials and URL are checked by the client when it is constructed,
/// credentials first.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    pub base_url: String,
    /// Account name used for basic authentication.
    pub username: String,
    /// Password or API token used for basic authentication.
    pub password: String,
    /// Server API generation. `4` selects the legacy prototype API.
    pub version: Option<u32>,
    /// Per-request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl ConfluenceConfig {
    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ConfluenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfluenceConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("version", &self.version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.password`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_PASSWORD`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cfl.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Creates the `[confluence]` section when any override is given and the
    /// file did not define one.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let has_overrides = settings.base_url.is_some()
            || settings.username.is_some()
            || settings.password.is_some();
        if !has_overrides {
            return;
        }

        let confluence = self.confluence.get_or_insert_with(ConfluenceConfig::default);
        if let Some(base_url) = &settings.base_url {
            confluence.base_url.clone_from(base_url);
        }
        if let Some(username) = &settings.username {
            confluence.username.clone_from(username);
        }
        if let Some(password) = &settings.password {
            confluence.password.clone_from(password);
        }
    }

    /// Get the Confluence section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(confluence) = &self.confluence
            && confluence.timeout_secs == Some(0)
        {
            return Err(ConfigError::Validation(
                "confluence.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.password = expand::expand_env(&confluence.password, "confluence.password")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.confluence.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_confluence_config() {
        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
username = "alice"
password = "hunter2"
version = 4
timeout_secs = 15
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://confluence.example.com");
        assert_eq!(confluence.username, "alice");
        assert_eq!(confluence.password, "hunter2");
        assert_eq!(confluence.version, Some(4));
        assert_eq!(confluence.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_parse_confluence_config_missing_fields_default_to_empty() {
        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert!(confluence.username.is_empty());
        assert!(confluence.password.is_empty());
        assert!(confluence.version.is_none());
        assert!(confluence.timeout().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let confluence = ConfluenceConfig {
            password: "hunter2".to_owned(),
            ..Default::default()
        };
        let debug = format!("{confluence:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_explicit_path() {
        let file = write_config(
            r#"
[confluence]
base_url = "https://wiki.example.org"
username = "bob"
password = "pw"
"#,
        );

        let config = Config::load(Some(file.path()), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(file.path()));
        let confluence = config.require_confluence().unwrap();
        assert_eq!(confluence.base_url, "https://wiki.example.org");
        assert_eq!(confluence.username, "bob");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/cfl.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("cfl.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("[confluence\nbase_url = ");
        let err = Config::load(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let file = write_config(
            r#"
[confluence]
base_url = "https://wiki.example.org"
timeout_secs = 0
"#,
        );
        let err = Config::load(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_apply_cli_settings_overrides_file_values() {
        let file = write_config(
            r#"
[confluence]
base_url = "https://wiki.example.org"
username = "bob"
password = "pw"
"#,
        );
        let settings = CliSettings {
            username: Some("carol".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(file.path()), Some(&settings)).unwrap();

        let confluence = config.require_confluence().unwrap();
        assert_eq!(confluence.username, "carol");
        assert_eq!(confluence.password, "pw"); // Unchanged
        assert_eq!(confluence.base_url, "https://wiki.example.org"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_creates_section() {
        let mut config = Config::default();
        let settings = CliSettings {
            base_url: Some("https://cli.example.com".to_owned()),
            username: Some("dave".to_owned()),
            password: Some("secret".to_owned()),
        };

        config.apply_cli_settings(&settings);

        let confluence = config.require_confluence().unwrap();
        assert_eq!(confluence.base_url, "https://cli.example.com");
        assert_eq!(confluence.username, "dave");
        assert_eq!(confluence.password, "secret");
    }

    #[test]
    fn test_apply_cli_settings_empty_keeps_section_absent() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_require_confluence_missing_section() {
        let config = Config::default();
        let err = config.require_confluence().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[confluence]"));
    }

    #[test]
    fn test_validate_without_confluence_section() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_expand_env_vars_confluence() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CFL_TEST_URL", "https://confluence.test.com");
            std::env::set_var("CFL_TEST_USER", "erin");
            std::env::set_var("CFL_TEST_PASSWORD", "s3cret");
        }

        let toml = r#"
[confluence]
base_url = "${CFL_TEST_URL}"
username = "${CFL_TEST_USER}"
password = "${CFL_TEST_PASSWORD}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://confluence.test.com");
        assert_eq!(confluence.username, "erin");
        assert_eq!(confluence.password, "s3cret");

        unsafe {
            std::env::remove_var("CFL_TEST_URL");
            std::env::remove_var("CFL_TEST_USER");
            std::env::remove_var("CFL_TEST_PASSWORD");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CFL_MISSING_PASSWORD");
        }

        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
username = "frank"
password = "${CFL_MISSING_PASSWORD}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CFL_MISSING_PASSWORD"));
        assert!(err.to_string().contains("confluence.password"));
    }

    #[test]
    fn test_expand_env_vars_default_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CFL_UNSET_USER");
        }

        let toml = r#"
[confluence]
username = "${CFL_UNSET_USER:-admin}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.confluence.unwrap().username, "admin");
    }
}
