#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_LOOKUP_PATH;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint_path, validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const BASE_URL_ENV: &str = "ADDRESS_BOOK_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Effective settings after layering: explicit overrides, then the config
/// file, then the environment, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub lookup_path: String,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lookup_path: DEFAULT_LOOKUP_PATH.to_string(),
            timeout_seconds: None,
            verbose: false,
            json_logs: false,
        }
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub lookup_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: Overrides) -> Self {
        let defaults = Settings::default();
        let lookup = file.map(|config| &config.lookup);

        let base_url = overrides
            .base_url
            .or_else(|| lookup.and_then(|l| l.base_url.clone()))
            .or_else(|| std::env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or(defaults.base_url);

        let lookup_path = overrides
            .lookup_path
            .or_else(|| lookup.and_then(|l| l.path.clone()))
            .unwrap_or(defaults.lookup_path);

        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| lookup.and_then(|l| l.timeout_seconds));

        Self {
            base_url,
            lookup_path,
            timeout_seconds,
            verbose: overrides.verbose || file.is_some_and(TomlConfig::verbose),
            json_logs: overrides.json_logs || file.is_some_and(TomlConfig::json_logs),
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lookup_path(&self) -> &str {
        &self.lookup_path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_endpoint_path("lookup_path", &self.lookup_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
