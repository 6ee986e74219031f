//! Settings loading.
//!
//! Layers, lowest priority first: built-in defaults, an optional
//! `booky.toml`, then `BOOKY_*` environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use booky_domain::ClientSettings;
use booky_domain::settings::{DEFAULT_API_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS};
use config::{Config, ConfigError, Environment, File, FileFormat};
use tracing::debug;

/// Default settings file, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "booky.toml";

/// Prefix of environment overrides, e.g. `BOOKY_API_BASE_URL`.
pub const ENV_PREFIX: &str = "BOOKY";

/// Builds [`ClientSettings`] from layered sources.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: PathBuf,
    env: Option<HashMap<String, String>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            env: None,
        }
    }
}

impl SettingsLoader {
    /// Loader reading `booky.toml` and the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from `file` instead of `booky.toml`. A missing file is
    /// skipped.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }

    /// Uses `vars` in place of the process environment.
    #[must_use]
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Loads the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong
    /// type.
    pub fn load(&self) -> Result<ClientSettings, ConfigError> {
        let settings: ClientSettings = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("refresh_interval_secs", DEFAULT_REFRESH_INTERVAL_SECS)?
            .add_source(
                File::from(self.file.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(self.env.clone()),
            )
            .build()?
            .try_deserialize()?;

        debug!(
            api_base_url = %settings.api_base_url,
            refresh_interval_secs = settings.refresh_interval_secs,
            "settings loaded"
        );
        Ok(settings)
    }
}
