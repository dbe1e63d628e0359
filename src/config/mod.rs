mod schema;

pub use schema::{Config, Settings};

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "ROLLPRED_CONFIG";

/// resolve the config path: explicit override, then env var, then ~/.rollpred/config.json
pub fn get_config_path_with_override(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    default_config_path()
}

fn default_config_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .join(".rollpred")
        .join("config.json"))
}

/// config file to read, or `None` when the default file does not exist
///
/// an explicitly requested file (flag or env var) must exist.
pub fn existing_config_path(override_path: Option<&Path>) -> Result<Option<PathBuf>> {
    let path = get_config_path_with_override(override_path)?;
    if path.exists() {
        return Ok(Some(path));
    }

    let is_default = override_path.is_none() && env::var(CONFIG_ENV_VAR).is_err();
    if is_default {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(None);
    }
    Err(anyhow!("config file not found: {}", path.display()))
}

/// load config, falling back to defaults when the default file does not exist
pub fn load_with_override(override_path: Option<&Path>) -> Result<Config> {
    match existing_config_path(override_path)? {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = json5::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        predicates = config.predicates.len(),
        facts = config.facts.len(),
        "loaded config"
    );
    Ok(config)
}

/// Verify configuration file and return a list of errors
pub fn verify(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(anyhow!("config file not found: {}", path.display()));
    }

    let config = load_from(path)?;
    Ok(verify_config(&config))
}

fn verify_config(config: &Config) -> Vec<String> {
    let mut errors = Vec::new();

    for name in config.predicates.keys() {
        if let Some(Err(e)) = config.predicate(name) {
            errors.push(format!("{}: {}", e.path, e.reason));
        }
    }

    for (i, option) in config.settings.base_facts.iter().enumerate() {
        if option.is_empty() {
            errors.push(format!("settings.base_facts[{}]: empty roll option", i));
        }
    }

    for (name, options) in &config.facts {
        for (i, option) in options.iter().enumerate() {
            if option.is_empty() {
                errors.push(format!("facts.{}[{}]: empty roll option", name, i));
            }
        }
    }

    errors
}
