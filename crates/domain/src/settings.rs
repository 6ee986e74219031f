//! Client settings
//!
//! Defines the connection and refresh preferences of the Booky client.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend location.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Default period of the background gamification refresh, in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Client settings, loaded from defaults, `booky.toml` and `BOOKY_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Background refresh period in seconds
    pub refresh_interval_secs: u64,
    /// Directory holding the session file; platform config dir when unset
    pub storage_dir: Option<PathBuf>,
    /// Per-request timeout in seconds; the HTTP client default when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            storage_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    /// Returns the refresh period, never shorter than one second.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
