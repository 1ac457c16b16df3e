//! Error types for readme-update

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for readme-update operations
pub type Result<T> = std::result::Result<T, ReadmeError>;

/// Main error type for readme-update
#[derive(Error, Debug)]
pub enum ReadmeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External tool errors
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// Document splicing errors
    #[error("{0}")]
    Splice(#[from] SpliceError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration discovery and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },
}

/// Errors raised while running the help-emitting tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// The preflight invocation could not be spawned or exited non-zero
    #[error("Tool '{program}' is unavailable (exit code {code:?})")]
    ToolUnavailable { program: String, code: Option<i32> },

    /// The capture invocation failed after a successful preflight
    #[error("Failed to capture help text from '{program}': {error}")]
    Capture { program: String, error: String },
}

/// Errors raised while building or committing the new document
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Opening marker '{marker}' not found in {}", path.display())]
    NoMarkersFound { path: PathBuf, marker: String },

    #[error("Closing marker '{marker}' not found after the opening marker in {}", path.display())]
    MissingClosingMarker { path: PathBuf, marker: String },

    #[error("Tool produced no help text")]
    EmptyHelpText,

    #[error("Assembled document is empty, refusing to overwrite")]
    AssemblyEmpty,

    #[error("{} is out of date", path.display())]
    OutOfDate { path: PathBuf },

    #[error("Failed to read document '{}': {error}", path.display())]
    Read { path: PathBuf, error: String },

    #[error("Failed to write document '{}': {error}", path.display())]
    Write { path: PathBuf, error: String },
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("Recursive interpolation detected")]
    RecursiveInterpolation,
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for tool invocations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Specialized result type for splice operations
pub type SpliceResult<T> = std::result::Result<T, SpliceError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;

/// Helper to tell whether an error left the document untouched because the
/// tool itself could not run
pub fn is_tool_unavailable(err: &ReadmeError) -> bool {
    matches!(err, ReadmeError::Tool(ToolError::ToolUnavailable { .. }))
}
