//! Configuration file support for liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,

    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Exercise library file; defaults to `<data_dir>/library.json`
    #[serde(default)]
    pub library_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            library_path: None,
        }
    }
}

impl DataConfig {
    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("library.json"))
    }
}

/// Default load increments for exercises whose plan gives no week 2 jump
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionConfig {
    #[serde(default = "default_heavy_weight_threshold")]
    pub heavy_weight_threshold: f64,

    #[serde(default = "default_heavy_increment")]
    pub heavy_increment: f64,

    #[serde(default = "default_light_increment")]
    pub light_increment: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            heavy_weight_threshold: default_heavy_weight_threshold(),
            heavy_increment: default_heavy_increment(),
            light_increment: default_light_increment(),
        }
    }
}

/// Plan parsing defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsingConfig {
    #[serde(default = "default_cycle_number")]
    pub default_cycle_number: u32,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            default_cycle_number: default_cycle_number(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("liftplan")
}

fn default_heavy_weight_threshold() -> f64 {
    50.0
}

fn default_heavy_increment() -> f64 {
    5.0
}

fn default_light_increment() -> f64 {
    2.5
}

fn default_cycle_number() -> u32 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("liftplan").join("config.toml")
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let p = &self.progression;
        if p.heavy_increment < 0.0 || p.light_increment < 0.0 {
            return Err(Error::Config(
                "progression increments must not be negative".into(),
            ));
        }
        if p.heavy_weight_threshold < 0.0 {
            return Err(Error::Config(
                "heavy_weight_threshold must not be negative".into(),
            ));
        }
        if self.parsing.default_cycle_number == 0 {
            return Err(Error::Config(
                "default_cycle_number must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
