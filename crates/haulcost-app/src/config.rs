//! Configuration management for haulcost
//!
//! Config stored at: ~/.config/haulcost/config.json

use crate::session::FALLBACK_AVERAGE_SPEED_KMH;
use haulcost_domain::model::DEFAULT_OWNER;
use haulcost_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog TOML override; defaults to catalog.toml next to the config
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Owner whose records are used
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Speed used when the owner's parameters carry none
    #[serde(default = "default_average_speed")]
    pub default_average_speed_kmh: f64,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_average_speed() -> f64 {
    FALLBACK_AVERAGE_SPEED_KMH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            owner: default_owner(),
            output_format: OutputFormat::default(),
            default_average_speed_kmh: default_average_speed(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("haulcost");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the catalog file path
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.catalog_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, or create default
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if self.default_average_speed_kmh.is_nan() || self.default_average_speed_kmh <= 0.0 {
            return Err(ConfigError::SaveError(format!(
                "default average speed must be greater than zero (got {})",
                self.default_average_speed_kmh
            ))
            .into());
        }

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Haulcost Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Catalog:        {}",
            self.catalog_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Owner:          {}", self.owner)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Default speed:  {} km/h", self.default_average_speed_kmh)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
