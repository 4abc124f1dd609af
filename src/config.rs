//! Application configuration.

use crate::consts::cli_consts::{polling, simulation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV_VAR: &str = "PAYMENTS_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the payments API. Falls back to the local backend when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Number of transactions requested per simulation.
    #[serde(default = "default_simulate_count")]
    pub simulate_count: u32,

    /// Spacing between simulated transactions, in milliseconds.
    #[serde(default = "default_simulate_interval_ms")]
    pub simulate_interval_ms: u64,

    /// Interval between background refreshes, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_simulate_count() -> u32 {
    simulation::DEFAULT_COUNT
}

fn default_simulate_interval_ms() -> u64 {
    simulation::DEFAULT_INTERVAL_MS
}

fn default_poll_interval_ms() -> u64 {
    polling::POLL_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            simulate_count: default_simulate_count(),
            simulate_interval_ms: default_simulate_interval_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Create Config pointing at the given API URL, with default simulation settings.
    #[allow(unused)]
    pub fn new(api_url: Option<String>) -> Self {
        Config {
            api_url,
            ..Default::default()
        }
    }

    /// Clamp user-editable values into the ranges the API accepts.
    pub fn normalized(mut self) -> Self {
        self.simulate_count = self
            .simulate_count
            .clamp(simulation::MIN_COUNT, simulation::MAX_COUNT);
        self.simulate_interval_ms = self.simulate_interval_ms.min(simulation::MAX_INTERVAL_MS);
        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = polling::POLL_INTERVAL_MS;
        }
        self
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration file if it exists, or the defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Path of the configuration file: `~/.payments-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".payments-dashboard").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new(Some("http://localhost:9000".to_string()));
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::default();
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config1 = Config::new(Some("http://first:8000".to_string()));
        config1.save(&path).unwrap();

        let config2 = Config::new(Some("http://second:8000".to_string()));
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // Missing fields fall back to their defaults.
    fn test_load_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"simulate_count": 25}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.simulate_count, 25);
        assert_eq!(config.api_url, None);
        assert_eq!(config.simulate_interval_ms, simulation::DEFAULT_INTERVAL_MS);
        assert_eq!(config.poll_interval_ms, polling::POLL_INTERVAL_MS);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_normalized_clamps_simulation_inputs() {
        let config = Config {
            api_url: None,
            simulate_count: 0,
            simulate_interval_ms: 60_000,
            poll_interval_ms: 0,
        }
        .normalized();
        assert_eq!(config.simulate_count, simulation::MIN_COUNT);
        assert_eq!(config.simulate_interval_ms, simulation::MAX_INTERVAL_MS);
        assert_eq!(config.poll_interval_ms, polling::POLL_INTERVAL_MS);
    }
}
