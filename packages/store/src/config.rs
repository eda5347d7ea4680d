//! # Client configuration: `zenvit.toml`
//!
//! The front-end talks to exactly one backend. Its base URL is read once at
//! startup and every request path is resolved against [`ClientConfig::api_base`].
//!
//! ```toml
//! [backend]
//! url = "https://crm.zenvit.no"
//! ```
//!
//! A missing or empty file is equivalent to [`ClientConfig::default`], which
//! points at a backend on `http://localhost:8001`.

use serde::{Deserialize, Serialize};

/// Backend URL used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig { url: url.into() },
        }
    }

    /// Build from an optional override, typically `option_env!("ZENVIT_BACKEND_URL")`.
    /// Blank overrides are ignored.
    pub fn from_env(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "zenvit.toml"
    }

    /// Backend URL without a trailing slash.
    pub fn backend_url(&self) -> &str {
        self.backend.url.trim_end_matches('/')
    }

    /// Root of the REST API, `<backend>/api`.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url())
    }

    /// Resolve a server-relative path such as an uploaded image URL.
    /// Absolute URLs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.backend_url(), path.trim_start_matches('/'))
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
