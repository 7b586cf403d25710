//! Configuration: `~/.untangle/config.toml`, created with defaults on first
//! run. The API key may live here, but the `GEMINI_API_KEY` /
//! `GOOGLE_API_KEY` environment variables take priority over it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::classifier::prompt::DEFAULT_MODEL;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// App directory — computed from home, not serialized.
    #[serde(skip)]
    pub untangle_dir: PathBuf,
    /// Path to config.toml — computed from home, not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Archive blob filename, relative to the app directory.
    #[serde(default = "default_archive_file")]
    pub archive_file: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_archive_file() -> String {
    "archive.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            untangle_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            archive_file: default_archive_file(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_at(&home.join(".untangle"))
    }

    /// Load the config under a specific app directory, creating directory
    /// and default file on first run.
    pub fn load_or_init_at(untangle_dir: &Path) -> Result<Self> {
        let config_path = untangle_dir.join("config.toml");

        if !untangle_dir.exists() {
            fs::create_dir_all(untangle_dir).context("Failed to create .untangle directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            config.untangle_dir = untangle_dir.to_path_buf();
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                untangle_dir: untangle_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, contents).context("Failed to write config file")?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature {} out of range 0.0..=2.0",
                self.temperature
            ))
            .into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()).into());
        }
        Ok(())
    }

    /// Path to the archive blob.
    pub fn archive_path(&self) -> PathBuf {
        self.untangle_dir.join(&self.archive_file)
    }
}
