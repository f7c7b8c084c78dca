use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variables that override the config file.
pub const ENV_WEATHER_API_KEY: &str = "PURRCAST_WEATHER_API_KEY";
pub const ENV_DIRECTORY_CLIENT_ID: &str = "PURRCAST_DIRECTORY_CLIENT_ID";
pub const ENV_DIRECTORY_CLIENT_SECRET: &str = "PURRCAST_DIRECTORY_CLIENT_SECRET";

/// Credentials for the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
}

/// Client credentials for the adoption directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [weather]
    /// api_key = "..."
    pub weather: Option<WeatherConfig>,

    /// [directory]
    /// client_id = "..."
    /// client_secret = "..."
    pub directory: Option<DirectoryConfig>,
}

impl Config {
    /// Weather credentials, failing with a hint when absent.
    pub fn weather(&self) -> Result<&WeatherConfig> {
        self.weather.as_ref().ok_or_else(|| {
            anyhow!(
                "No weather provider API key configured.\n\
                 Hint: run `purrcast configure weather` or set {ENV_WEATHER_API_KEY}."
            )
        })
    }

    /// Directory credentials, failing with a hint when absent.
    pub fn directory(&self) -> Result<&DirectoryConfig> {
        self.directory.as_ref().ok_or_else(|| {
            anyhow!(
                "No adoption-directory credentials configured.\n\
                 Hint: run `purrcast configure directory` or set \
                 {ENV_DIRECTORY_CLIENT_ID} and {ENV_DIRECTORY_CLIENT_SECRET}."
            )
        })
    }

    pub fn set_weather_api_key(&mut self, api_key: String) {
        self.weather = Some(WeatherConfig { api_key });
    }

    pub fn set_directory_credentials(&mut self, client_id: String, client_secret: String) {
        self.directory = Some(DirectoryConfig {
            client_id,
            client_secret,
        });
    }

    /// Load config from disk (empty default if the file doesn't exist yet),
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            // First run: no config file.
            Self::default()
        };

        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "purrcast", "purrcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var(ENV_WEATHER_API_KEY) {
            if !api_key.is_empty() {
                self.weather = Some(WeatherConfig { api_key });
            }
        }

        if let (Ok(client_id), Ok(client_secret)) = (
            env::var(ENV_DIRECTORY_CLIENT_ID),
            env::var(ENV_DIRECTORY_CLIENT_SECRET),
        ) {
            if !client_id.is_empty() && !client_secret.is_empty() {
                self.directory = Some(DirectoryConfig {
                    client_id,
                    client_secret,
                });
            }
        }
    }
}
