//! Configuration management for repeaterview.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::Page;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "repeaterview";

/// Default repeater document, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "repeaters.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `REPEATERVIEW_`)
/// 2. TOML config file at `~/.config/repeaterview/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data source configuration.
    pub data: DataConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
}

/// Where the repeater document lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the repeater JSON document.
    pub path: PathBuf,
}

/// Rendering defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page to render (`index` or `repeaters`).
    /// When unset, the page is detected from the input file name.
    pub page: Option<String>,
    /// Where to write the rendered page. Stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("REPEATERVIEW_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.data.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "data.path must not be empty".to_string(),
            });
        }

        if let Some(page) = &self.render.page {
            page.parse::<Page>().map_err(|e| Error::ConfigValidation {
                message: format!("render.page: {e}"),
            })?;
        }

        Ok(())
    }

    /// The configured page, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name is not a known page.
    pub fn page(&self) -> Result<Option<Page>> {
        self.render.page.as_deref().map(str::parse::<Page>).transpose()
    }
}
