//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::store::ConfigStore;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Configuration loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the gateway configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = read(path)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Path of the configuration file for `site_id`.
pub fn site_config_path(directory: &Path, file_prefix: &str, site_id: u64) -> PathBuf {
    directory.join(format!("{file_prefix}{site_id}.toml"))
}

/// Load the configuration of one site.
///
/// A missing file is not an error: the site simply has no configuration and
/// `Ok(None)` is returned.
pub fn load_site_config(
    directory: &Path,
    file_prefix: &str,
    site_id: u64,
) -> Result<Option<ConfigStore>, ConfigError> {
    let path = site_config_path(directory, file_prefix, site_id);
    if !path.is_file() {
        tracing::debug!(site_id, path = %path.display(), "No site configuration file");
        return Ok(None);
    }

    let content = read(&path)?;
    let table: toml::Table = content
        .parse()
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

    let mut store = ConfigStore::new();
    store.init(table);

    tracing::info!(site_id, path = %path.display(), "Site configuration loaded");
    Ok(Some(store))
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
