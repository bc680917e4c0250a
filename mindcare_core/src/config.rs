//! Configuration file support for MindCare.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mindcare/config.toml`.
//! Every section is optional.

use crate::breathing::{builtin_profiles, find_profile, validate_profiles, BreathingProfile};
use crate::mood::DayBoundary;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub mood: MoodConfig,

    #[serde(default)]
    pub breathing: BreathingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Mood log configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Which clock decides "same calendar day"
    #[serde(default)]
    pub day_boundary: DayBoundary,

    /// Number of entries shown in the recent history
    #[serde(default = "default_history_days")]
    pub history_days: usize,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            day_boundary: DayBoundary::default(),
            history_days: default_history_days(),
        }
    }
}

/// Breathing exercise configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_profile_name")]
    pub default_profile: String,

    /// Cycles per session when none are requested
    #[serde(default = "default_cycles")]
    pub default_cycles: u64,

    /// Length of one countdown step
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Extra profiles on top of the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<BreathingProfile>,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_profile: default_profile_name(),
            default_cycles: default_cycles(),
            tick_millis: default_tick_millis(),
            profiles: Vec::new(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("mindcare")
}

fn default_history_days() -> usize {
    7
}

fn default_profile_name() -> String {
    "4-7-8 Breathing".into()
}

fn default_cycles() -> u64 {
    4
}

fn default_tick_millis() -> u64 {
    1000
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

    /// Load configuration from a specific path.
    ///
    /// Custom breathing profiles are validated here, so a degenerate
    /// profile is reported before any exercise can select it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("mindcare").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check values that serde alone cannot
    pub fn validate(&self) -> Result<()> {
        validate_profiles(&self.profiles())?;

        if find_profile(&self.profiles(), &self.breathing.default_profile).is_none() {
            return Err(Error::Config(format!(
                "default breathing profile {:?} is not defined",
                self.breathing.default_profile
            )));
        }
        if self.breathing.tick_millis == 0 {
            return Err(Error::Config("breathing.tick_millis must be positive".into()));
        }
        if self.mood.history_days == 0 {
            return Err(Error::Config("mood.history_days must be positive".into()));
        }
        Ok(())
    }

    /// Built-in profiles followed by the configured custom ones
    pub fn profiles(&self) -> Vec<BreathingProfile> {
        builtin_profiles()
            .iter()
            .cloned()
            .chain(self.breathing.profiles.iter().cloned())
            .collect()
    }

    /// Where the key-value store lives under a data directory
    pub fn store_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("store")
    }
}
