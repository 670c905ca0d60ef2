//! Probe configuration file.

use rime_settings::{ResolverConfig, DEFAULT_SOURCE_NAME};
use rime_settings_yaml::SearchPaths;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `--config <file>`. Missing fields use defaults; CLI
/// flags override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub source_name: String,
    pub user_dir: Option<PathBuf>,
    pub shared_dir: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            user_dir: None,
            shared_dir: None,
        }
    }
}

impl ProbeConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            source_name: self.source_name.clone(),
        }
    }

    /// Configured directories, falling back to the Rime defaults.
    pub fn search_paths(&self) -> SearchPaths {
        let defaults = SearchPaths::default();
        SearchPaths {
            user_dir: self.user_dir.clone().unwrap_or(defaults.user_dir),
            shared_dir: self.shared_dir.clone().unwrap_or(defaults.shared_dir),
        }
    }
}

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load the probe config, or defaults when no file was given.
pub fn load(path: Option<&Path>) -> anyhow::Result<ProbeConfig> {
    match path {
        Some(path) => {
            let config = load_yaml::<ProbeConfig>(path)?;
            tracing::debug!("Loaded probe config from {:?}", path);
            Ok(config)
        }
        None => Ok(ProbeConfig::default()),
    }
}
