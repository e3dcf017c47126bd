//! `AppConfig` struct and TOML loading.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use movix_api::tmdb::RetryPolicy;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Run mode settings.
    #[serde(default)]
    pub app: AppSection,
    /// TMDB API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Retry policy settings.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// `[app]` section.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppSection {
    /// Run mode (overridden by `MOVIX_MODE`).
    #[serde(default)]
    pub mode: Mode,
}

/// `[api]` section.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API base URL (default: `https://api.themoviedb.org/3/`).
    pub base_url: Option<String>,
    /// Response language (e.g. "en-US").
    pub language: Option<String>,
    /// ISO 3166-1 region for release dates and lists (e.g. "US").
    pub region: Option<String>,
}

/// `[retry]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Backoff unit in milliseconds.
    pub delay_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries(),
            delay_base_ms: u64::try_from(policy.delay_base().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl RetryConfig {
    /// Converts to the client retry policy.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.delay_base_ms))
    }
}

/// Run mode. Development logs at `debug`, production at `info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Verbose diagnostics.
    Development,
    /// Regular output only.
    #[default]
    Production,
}

impl Mode {
    /// Picks `MOVIX_MODE` when it names a valid mode, else `configured`.
    #[must_use]
    pub fn resolve(env_value: Option<&str>, configured: Self) -> Self {
        env_value
            .and_then(|v| v.parse().ok())
            .unwrap_or(configured)
    }

    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn default_filter(self) -> &'static str {
        match self {
            Self::Development => "info,movix=debug,movix_api=debug",
            Self::Production => "info",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => bail!("unknown mode '{other}' (expected development or production)"),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parsed `api.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.api
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid api.base_url: {raw}")))
            .transpose()
    }
}
