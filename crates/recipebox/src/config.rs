//! Configuration management for recipebox.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{is_web_url, DEFAULT_DESCRIPTION_PREVIEW_CHARS, DEFAULT_PLACEHOLDER_IMAGE};
use crate::storage::DEFAULT_RECIPES_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "recipebox";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "recipebox.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RECIPEBOX_`)
/// 2. TOML config file at `~/.config/recipebox/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Catalog presentation and input configuration.
    pub catalog: CatalogConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/recipebox/recipebox.db`
    pub database_path: Option<PathBuf>,
    /// Key the recipe collection is stored under.
    pub key: String,
}

/// Catalog-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Title used for rendered pages.
    pub title: String,
    /// Categories a recipe may be filed under.
    pub categories: Vec<String>,
    /// Image shown for recipes without one.
    pub placeholder_image: String,
    /// Description characters shown on a recipe card.
    pub description_preview_chars: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: DEFAULT_RECIPES_KEY.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            title: "Recipe Catalog".to_string(),
            categories: default_categories(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            description_preview_chars: DEFAULT_DESCRIPTION_PREVIEW_CHARS,
        }
    }
}

/// Default recipe categories.
fn default_categories() -> Vec<String> {
    ["Breakfast", "Lunch", "Dinner", "Dessert", "Snack", "Beverage"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `RECIPEBOX_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("RECIPEBOX_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::config_validation("storage key must not be empty"));
        }

        if self.catalog.categories.is_empty() {
            return Err(Error::config_validation(
                "at least one category must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.catalog.categories {
            if category.trim().is_empty() {
                return Err(Error::config_validation("categories must not be blank"));
            }
            if category.trim() != category {
                return Err(Error::config_validation(format!(
                    "category has surrounding whitespace: {category:?}"
                )));
            }
            if !seen.insert(category.as_str()) {
                return Err(Error::config_validation(format!(
                    "duplicate category: {category}"
                )));
            }
        }

        if !is_web_url(&self.catalog.placeholder_image) {
            return Err(Error::config_validation(format!(
                "placeholder_image must be an http(s) URL: {}",
                self.catalog.placeholder_image
            )));
        }

        if self.catalog.description_preview_chars == 0 {
            return Err(Error::config_validation(
                "description_preview_chars must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
