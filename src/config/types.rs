//! Core configuration types
//!
//! This module defines the data structures that represent a readme-update.yml
//! configuration file. Every field is optional; missing fields fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Document updated when no configuration says otherwise
pub const DEFAULT_DOCUMENT: &str = "README.mkdn";

/// Opening marker of the spliced region
pub const DEFAULT_OPEN_MARKER: &str = "<pre><code>";

/// Closing marker of the spliced region
pub const DEFAULT_CLOSE_MARKER: &str = "</pre></code>";

/// Flag passed to the tool to print its usage
pub const DEFAULT_HELP_FLAG: &str = "--help";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Document to regenerate, relative to the config directory
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Tool whose help output is spliced in
    #[serde(default)]
    pub tool: ToolConfig,

    /// Marker pair delimiting the spliced region
    #[serde(default)]
    pub markers: Markers,
}

/// How to invoke the help-emitting tool
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Program followed by its arguments (e.g., ["python", "-m", "rganalysis"])
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Flag appended to the command to print help
    #[serde(default = "default_help_flag")]
    pub help_flag: String,

    /// Extra environment variables for the tool
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Search path adjustment so the tool can be located
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<SearchPath>,

    /// Dotenv file whose variables are passed to the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotenv: Option<PathBuf>,
}

/// Entries prepended to a path-list environment variable of the tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchPath {
    /// Variable name (e.g., PYTHONPATH)
    pub var: String,

    /// Directories to prepend, relative to the config directory
    #[serde(default)]
    pub entries: Vec<PathBuf>,
}

/// Literal marker substrings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Markers {
    #[serde(default = "default_open_marker")]
    pub open: String,

    #[serde(default = "default_close_marker")]
    pub close: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            document: default_document(),
            tool: ToolConfig::default(),
            markers: Markers::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            command: default_command(),
            help_flag: default_help_flag(),
            env: BTreeMap::new(),
            search_path: Some(SearchPath {
                var: "PYTHONPATH".to_string(),
                entries: vec![PathBuf::from(".")],
            }),
            dotenv: None,
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            open: default_open_marker(),
            close: default_close_marker(),
        }
    }
}

impl ToolConfig {
    /// Program name (first word of the command)
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }
}

fn default_document() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT)
}

fn default_command() -> Vec<String> {
    vec![
        "python".to_string(),
        "-m".to_string(),
        "rganalysis".to_string(),
    ]
}

fn default_help_flag() -> String {
    DEFAULT_HELP_FLAG.to_string()
}

fn default_open_marker() -> String {
    DEFAULT_OPEN_MARKER.to_string()
}

fn default_close_marker() -> String {
    DEFAULT_CLOSE_MARKER.to_string()
}
