pub mod schema;

pub use schema::EngineConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variables checked, in order, for the completion API key.
pub const API_KEY_ENV_VARS: &[&str] = &["AITOOLS_API_KEY", "DEEPSEEK_API_KEY"];

/// Default aitools home directory (~/.aitools).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".aitools"))
        .unwrap_or_else(|| PathBuf::from(".aitools"))
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read aitools config file")?;
        let config: EngineConfig =
            toml::from_str(&contents).context("Failed to parse aitools config (TOML)")?;
        Ok(config)
    } else {
        Ok(EngineConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}

/// Overlay the API key from the environment onto a loaded config.
///
/// `lookup` is injected so the precedence can be exercised without touching
/// the process environment.
pub fn apply_env_overrides<F>(config: &mut EngineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = API_KEY_ENV_VARS
        .iter()
        .filter_map(|&name| lookup(name))
        .find(|v| !v.trim().is_empty())
    {
        config.api_key = key;
    }
}
