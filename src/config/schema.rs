//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{Config, Markers, SearchPath, ToolConfig};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.document.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("document path is empty".to_string()));
    }

    validate_tool(&config.tool)?;
    validate_markers(&config.markers)?;

    Ok(())
}

/// Validate the tool invocation
pub fn validate_tool(tool: &ToolConfig) -> ConfigResult<()> {
    if tool.program().trim().is_empty() {
        return Err(ConfigError::Invalid(
            "tool.command must name a program".to_string(),
        ));
    }

    if tool.help_flag.trim().is_empty() {
        return Err(ConfigError::Invalid("tool.help_flag is empty".to_string()));
    }

    for key in tool.env.keys() {
        validate_var_name(key)?;
    }

    if let Some(search_path) = &tool.search_path {
        validate_search_path(search_path)?;
    }

    Ok(())
}

/// Validate the marker pair
pub fn validate_markers(markers: &Markers) -> ConfigResult<()> {
    if markers.open.is_empty() || markers.close.is_empty() {
        return Err(ConfigError::Invalid("markers must not be empty".to_string()));
    }

    if markers.open.contains('\n') || markers.close.contains('\n') {
        return Err(ConfigError::Invalid(
            "markers must fit on a single line".to_string(),
        ));
    }

    if markers.open == markers.close {
        return Err(ConfigError::Invalid(format!(
            "opening and closing markers are both '{}'",
            markers.open
        )));
    }

    Ok(())
}

fn validate_search_path(search_path: &SearchPath) -> ConfigResult<()> {
    if search_path.var.is_empty() {
        return Err(ConfigError::Invalid(
            "tool.search_path.var is empty".to_string(),
        ));
    }
    validate_var_name(&search_path.var)
}

fn validate_var_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(ConfigError::Invalid(format!(
            "invalid environment variable name '{}'",
            name
        )));
    }
    Ok(())
}
