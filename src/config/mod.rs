//! Configuration management.
//!
//! Configuration layers, lowest priority first: built-in defaults, the
//! TOML config file, then environment variables. Root-scope environment
//! fallback has one extra rule: the root env vars apply only when the
//! config provides no explicit roots at all (see `access::RootSet`).

use crate::workspace::HttpWorkspaceClient;
use serde::Deserialize;
use std::path::Path;

/// Environment override for the API token.
pub const API_TOKEN_ENV: &str = "PAGEGATE_API_TOKEN";

/// Environment override for the API endpoint.
pub const API_ENDPOINT_ENV: &str = "PAGEGATE_API_ENDPOINT";

/// Environment override for the API version header.
pub const API_VERSION_ENV: &str = "PAGEGATE_API_VERSION";

/// Main configuration for pagegate.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// Workspace API settings.
    pub api: ApiSettings,
    /// Access scope settings.
    pub access: AccessSettings,
}

/// Workspace API connection settings.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// API endpoint base URL.
    pub endpoint: String,
    /// API version header value.
    pub version: String,
    /// Bearer token; usually supplied via [`API_TOKEN_ENV`].
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: HttpWorkspaceClient::DEFAULT_ENDPOINT.to_string(),
            version: HttpWorkspaceClient::DEFAULT_VERSION.to_string(),
            token: None,
            timeout_secs: HttpWorkspaceClient::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Access scope settings.
#[derive(Debug, Clone, Default)]
pub struct AccessSettings {
    /// Explicit root page ids.
    pub root_page_ids: Vec<String>,
    /// Explicit root page URLs.
    pub root_page_urls: Vec<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// API section.
    pub api: Option<ConfigFileApi>,
    /// Access section.
    pub access: Option<ConfigFileAccess>,
}

/// API section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileApi {
    /// Endpoint base URL.
    pub endpoint: Option<String>,
    /// Version header value.
    pub version: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Access section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileAccess {
    /// Root page ids.
    pub root_page_ids: Option<Vec<String>>,
    /// Root page URLs.
    pub root_page_urls: Option<Vec<String>>,
}

impl GateConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path, then applies env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file).apply_env())
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/pagegate/` on macOS)
    /// 2. XDG config dir (`~/.config/pagegate/` for Unix compatibility)
    ///
    /// Returns default configuration (plus env overrides) if no config file
    /// is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default().apply_env();
        };

        // Check platform-specific config dir first
        let platform_config = base_dirs.config_dir().join("pagegate").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        // Fall back to XDG-style ~/.config/pagegate/ for Unix compatibility
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("pagegate")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default().apply_env()
    }

    /// Converts a `ConfigFile` to `GateConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(api) = file.api {
            if let Some(endpoint) = api.endpoint {
                config.api.endpoint = endpoint;
            }
            if let Some(version) = api.version {
                config.api.version = version;
            }
            if let Some(timeout) = api.timeout_secs {
                config.api.timeout_secs = timeout;
            }
            config.api.token = api.token;
        }
        if let Some(access) = file.access {
            if let Some(ids) = access.root_page_ids {
                config.access.root_page_ids = ids;
            }
            if let Some(urls) = access.root_page_urls {
                config.access.root_page_urls = urls;
            }
        }

        config
    }

    /// Applies environment variable overrides.
    #[must_use]
    fn apply_env(mut self) -> Self {
        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            self.api.token = Some(token);
        }
        if let Ok(endpoint) = std::env::var(API_ENDPOINT_ENV) {
            self.api.endpoint = endpoint;
        }
        if let Ok(version) = std::env::var(API_VERSION_ENV) {
            self.api.version = version;
        }
        self
    }

    /// Sets the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api.token = Some(token.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api.endpoint = endpoint.into();
        self
    }

    /// Sets explicit root page ids.
    #[must_use]
    pub fn with_root_page_ids(mut self, ids: Vec<String>) -> Self {
        self.access.root_page_ids = ids;
        self
    }

    /// Sets explicit root page URLs.
    #[must_use]
    pub fn with_root_page_urls(mut self, urls: Vec<String>) -> Self {
        self.access.root_page_urls = urls;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GateConfig::new();
        assert_eq!(config.api.endpoint, HttpWorkspaceClient::DEFAULT_ENDPOINT);
        assert_eq!(config.api.version, HttpWorkspaceClient::DEFAULT_VERSION);
        assert!(config.api.token.is_none());
        assert!(config.access.root_page_ids.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
endpoint = "https://workspace.internal/v1"
timeout_secs = 10

[access]
root_page_ids = ["11111111-1111-1111-1111-111111111111"]
root_page_urls = ["https://www.example.so/Home-22222222222222222222222222222222"]
"#
        )
        .unwrap();

        let config = GateConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.api.endpoint, "https://workspace.internal/v1");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.access.root_page_ids.len(), 1);
        assert_eq!(config.access.root_page_urls.len(), 1);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = GateConfig::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        assert!(GateConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_builders() {
        let config = GateConfig::new()
            .with_token("secret_0123456789abcdef0123456789abcdef")
            .with_endpoint("https://workspace.internal/v1")
            .with_root_page_ids(vec!["id".to_string()]);
        assert!(config.api.token.is_some());
        assert_eq!(config.api.endpoint, "https://workspace.internal/v1");
        assert_eq!(config.access.root_page_ids, vec!["id".to_string()]);
    }
}
