use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Locations of the per-user files. Passed into the stores instead of
/// living in globals so tests can point everything at a temp directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub history_file: PathBuf,
}

impl AppPaths {
    /// `~/.config/autoterm/{config,history}.json`
    pub fn from_home() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::in_dir(home_dir.join(".config").join("autoterm")))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let config_dir = dir.into();
        AppPaths {
            config_file: config_dir.join("config.json"),
            history_file: config_dir.join("history.json"),
            config_dir,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

pub struct ConfigStore {
    paths: AppPaths,
    env_var: String,
}

impl ConfigStore {
    pub fn new(paths: AppPaths) -> Self {
        Self::with_env_var(paths, API_KEY_ENV)
    }

    pub fn with_env_var(paths: AppPaths, env_var: &str) -> Self {
        ConfigStore {
            paths,
            env_var: env_var.to_string(),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.paths.config_file
    }

    /// Reads the config file (if any) and applies the environment override.
    /// The override only affects the returned value, never the file.
    pub fn load(&self) -> Result<Config> {
        let mut config = self.load_file()?;

        if let Ok(key) = std::env::var(&self.env_var) {
            debug!("Using API key from ${}", self.env_var);
            config.api_key = Some(key);
        }

        Ok(config)
    }

    fn load_file(&self) -> Result<Config> {
        let path = &self.paths.config_file;
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        fs::create_dir_all(&self.paths.config_dir).with_context(|| {
            format!(
                "Failed to create config directory {}",
                self.paths.config_dir.display()
            )
        })?;

        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.paths.config_file, json).with_context(|| {
            format!(
                "Failed to write config file {}",
                self.paths.config_file.display()
            )
        })?;
        Ok(())
    }
}
