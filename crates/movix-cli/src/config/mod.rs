//! Application configuration module.
//!
//! Manages the TOML config file: API base URL, language and region, retry
//! policy and the run mode.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig, AppSection, Mode, RetryConfig};
pub use paths::resolve_config_path;
