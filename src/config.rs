//! Service configuration: loading, validating, and the stock config printer.
//!
//! Configuration is a single optional `restyle.toml` — there is no cascade
//! and nothing persisted per session. The API key is usually *not* in the
//! file: the `GEMINI_API_KEY` environment variable overrides whatever the
//! file says, so keys stay out of dotfiles and shell history decides.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! api_base = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-2.5-flash-image"
//! max_dimension = 1024   # longer-edge bound for normalized uploads
//! # api_key = "..."      # prefer the GEMINI_API_KEY environment variable
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "restyle.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for the generation service and the local pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the generation API.
    pub api_base: String,
    /// Model invoked via `models/{model}:generateContent`.
    pub model: String,
    /// API key; the `GEMINI_API_KEY` env var takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Longer-edge bound applied when normalizing uploads.
    pub max_dimension: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            api_key: None,
            max_dimension: 1024,
        }
    }
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Validation("api_base must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        if self.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "max_dimension must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The effective API key, or a validation error naming the fix.
    pub fn require_api_key(&self) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "no API key configured: set {API_KEY_ENV} or api_key in {CONFIG_FILENAME}"
                ))
            })
    }
}

/// Load configuration.
///
/// An explicit path must exist and parse; without one, `restyle.toml` in the
/// working directory is used when present, stock defaults otherwise. The
/// `GEMINI_API_KEY` environment variable overrides the file's key either way.
pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(explicit) => parse_file(explicit)?,
        None => {
            let implicit = Path::new(CONFIG_FILENAME);
            if implicit.exists() {
                parse_file(implicit)?
            } else {
                ServiceConfig::default()
            }
        }
    };

    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.trim().is_empty()
    {
        config.api_key = Some(key);
    }

    config.validate()?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;
    Ok(config)
}

/// A documented stock `restyle.toml`, for `restyle gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = ServiceConfig::default();
    format!(
        "\
# restyle configuration. All options are optional; defaults shown.

# Base URL of the generation API.
api_base = \"{}\"

# Model invoked via models/{{model}}:generateContent.
model = \"{}\"

# Longer-edge bound for normalized uploads, in pixels.
max_dimension = {}

# API key. Prefer the {} environment variable over this file.
# api_key = \"...\"
",
        defaults.api_base, defaults.model, defaults.max_dimension, API_KEY_ENV
    )
}
