//! Connection settings and their resolved form.
//!
//! [`ClientSettings`] is what callers fill in. [`ApiConfig`] is derived from
//! it exactly once, when the client is built, and never changes afterwards.

use std::fmt;
use std::time::Duration;

use cfl_config::ConfluenceConfig;

use crate::auth::BasicAuth;
use crate::error::ConfigurationError;

/// Version marker selecting the Confluence 4 prototype API.
pub const LEGACY_API_VERSION: u32 = 4;

/// REST API prefix for Confluence 5 and later.
const REST_API_PATH: &str = "/rest/api";

/// API prefix of the Confluence 4 prototype API.
const LEGACY_API_PATH: &str = "/rest/prototype/1";

/// Resource extension required by the prototype API.
const LEGACY_EXTENSION: &str = ".json";

/// Connection settings supplied by the caller.
#[derive(Clone, Default)]
pub struct ClientSettings {
    /// Account name for basic authentication.
    pub username: String,
    /// Password or API token for basic authentication.
    pub password: String,
    /// Server base URL, e.g. `https://confluence.example.com`.
    pub base_url: String,
    /// Server API generation; [`LEGACY_API_VERSION`] selects the prototype API.
    pub version: Option<u32>,
    /// Per-request timeout. No timeout when `None`.
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    /// Settings for the current REST API with no timeout.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: base_url.into(),
            version: None,
            timeout: None,
        }
    }

    /// Set the server API version marker.
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<&ConfluenceConfig> for ClientSettings {
    fn from(config: &ConfluenceConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            base_url: config.base_url.clone(),
            version: config.version,
            timeout: config.timeout(),
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolved, immutable connection descriptor shared by every operation.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    api_path: &'static str,
    extension: &'static str,
    auth: BasicAuth,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// Validate settings and derive the API path and resource extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingCredentials`] when username or
    /// password is empty, then [`ConfigurationError::MissingBaseUrl`] when the
    /// base URL is empty, then [`ConfigurationError::InvalidBaseUrl`] when it
    /// lacks an http(s) scheme. Only the first failing check is reported.
    pub fn resolve(settings: ClientSettings) -> Result<Self, ConfigurationError> {
        if settings.username.is_empty() || settings.password.is_empty() {
            return Err(ConfigurationError::MissingCredentials);
        }
        if settings.base_url.is_empty() {
            return Err(ConfigurationError::MissingBaseUrl);
        }
        if !settings.base_url.starts_with("http://") && !settings.base_url.starts_with("https://")
        {
            return Err(ConfigurationError::InvalidBaseUrl(settings.base_url));
        }

        let (api_path, extension) = if settings.version == Some(LEGACY_API_VERSION) {
            (LEGACY_API_PATH, LEGACY_EXTENSION)
        } else {
            (REST_API_PATH, "")
        };

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            api_path,
            extension,
            auth: BasicAuth::new(&settings.username, &settings.password),
            timeout: settings.timeout,
        })
    }

    /// Server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API prefix appended to the base URL.
    pub fn api_path(&self) -> &str {
        self.api_path
    }

    /// Suffix appended to every resource path (`.json` for the legacy API).
    pub fn extension(&self) -> &str {
        self.extension
    }

    /// Whether the legacy prototype API is in use.
    pub fn is_legacy(&self) -> bool {
        self.api_path == LEGACY_API_PATH
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn auth(&self) -> &BasicAuth {
        &self.auth
    }
}
