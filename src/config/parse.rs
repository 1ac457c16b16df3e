//! Configuration file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, ReadmeError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &[".readme-update.yml", "readme-update.yml"];

/// Find the configuration file by searching `start_dir` and its parents
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, ReadmeError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string
///
/// An empty file yields the default configuration.
pub fn parse_config(yaml: &str) -> Result<Config, ReadmeError> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Load configuration with automatic file discovery
///
/// Returns the configuration together with the directory relative paths are
/// resolved against: the config file's directory, or the current directory
/// when no file exists anywhere up the tree.
pub fn load_config_auto() -> Result<(Config, PathBuf), ReadmeError> {
    load_config_from(current_dir()?)
}

/// Same as [`load_config_auto`], starting the search from `start_dir`
pub fn load_config_from(start_dir: PathBuf) -> Result<(Config, PathBuf), ReadmeError> {
    match find_config_file_from(start_dir.clone()) {
        Ok(path) => {
            log::debug!("Using config file {}", path.display());
            let config = parse_config_file(&path)?;
            Ok((config, config_dir(&path)))
        }
        Err(ConfigError::NotFound(searched)) => {
            log::debug!("No config file found (searched: {}), using defaults", searched);
            Ok((Config::default(), start_dir))
        }
        Err(e) => Err(e.into()),
    }
}

/// Load an explicitly named configuration file
pub fn load_config_file(path: &Path) -> Result<(Config, PathBuf), ReadmeError> {
    let config = parse_config_file(path)?;
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir()?.join(path)
    };
    Ok((config, config_dir(&path)))
}

fn config_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn current_dir() -> ConfigResult<PathBuf> {
    env::current_dir()
        .map_err(|e| ConfigError::Invalid(format!("Failed to get current directory: {}", e)))
}
