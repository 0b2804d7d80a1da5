pub mod station;

pub use station::{Config, DebugLogRotation, Provider, SearchSettings, Station, VideoSettings};

use crate::error::InitError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "SAGE_LENS_CONFIG";

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
        if !custom.trim().is_empty() {
            return Ok(PathBuf::from(custom));
        }
    }

    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("sage-lens");

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from the default path, or create it if missing
pub fn load_or_create_config() -> Result<Config> {
    load_or_create_config_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there first if it doesn't exist
pub fn load_or_create_config_at(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        validate(&config)?;
        Ok(config)
    } else {
        let config = Config::default();
        save_config_at(&config, path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(config)
    }
}

/// Save configuration to `path`
pub fn save_config_at(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

/// Reject configurations that can never produce a result.
pub fn validate(config: &Config) -> Result<(), InitError> {
    if config.stations.is_empty() {
        return Err(InitError::Config("at least one station must be configured".into()));
    }
    for station in &config.stations {
        if !station.prompt_template.contains("{topic}") {
            return Err(InitError::Config(format!(
                "station '{}' prompt_template must contain {{topic}}",
                station.id
            )));
        }
    }
    if config.search.max_results == 0 || config.video.max_results == 0 {
        return Err(InitError::Config("max_results must be > 0".into()));
    }
    Ok(())
}

/// Read a credential from the environment; empty values count as missing.
pub fn credential(var: &str) -> Result<String, InitError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(InitError::MissingCredential {
            var: var.to_string(),
        }),
    }
}
