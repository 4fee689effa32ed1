//! Configuration file handling

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "SMOKE_BASE_URL";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Server under test
    #[serde(default)]
    pub target: TargetConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Login credentials keyed by role name
    #[serde(default)]
    pub credentials: HashMap<String, Credentials>,
}

/// Server under test
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Timeout for establishing a connection
    #[serde(default = "default_connect")]
    pub connect_secs: u64,

    /// Timeout for a whole request, including reading the body
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect_secs: default_connect(),
            request_secs: default_request(),
        }
    }
}

impl Timeouts {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    /// Both timeouts must be at least one second
    pub fn validate(&self) -> Result<()> {
        if self.connect_secs == 0 {
            return Err(Error::Config("connect timeout must be at least 1 second".into()));
        }
        if self.request_secs == 0 {
            return Err(Error::Config("request timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

fn default_connect() -> u64 {
    10
}
fn default_request() -> u64 {
    30
}

/// Username/password pair for one role
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Seed accounts of the time-tracking backend
    fn builtin(role: &str) -> Option<Self> {
        match role {
            "owner" => Some(Self::new("owner", "owner123")),
            "admin" => Some(Self::new("admin", "admin123")),
            "user" => Some(Self::new("user", "user123")),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Get credentials for a role
    ///
    /// Falls back to the backend's seed accounts if not explicitly configured
    pub fn credentials_for(&self, role: &str) -> Option<Credentials> {
        self.credentials
            .get(role)
            .cloned()
            .or_else(|| Credentials::builtin(role))
    }

    /// Resolve the effective base URL
    ///
    /// Precedence: command line, then `SMOKE_BASE_URL`, then the config file.
    pub fn resolve_base_url(&self, cli: Option<&str>) -> Result<String> {
        let env = std::env::var(BASE_URL_ENV).ok();
        self.pick_base_url(cli, env.as_deref())
    }

    fn pick_base_url(&self, cli: Option<&str>, env: Option<&str>) -> Result<String> {
        let raw = cli
            .or(env)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.target.base_url);

        let url = reqwest::Url::parse(raw).map_err(|e| Error::invalid_base_url(raw, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_base_url(raw, "scheme must be http or https"));
        }

        Ok(raw.trim_end_matches('/').to_string())
    }
}
