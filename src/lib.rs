//! readme-update - keep a README's usage section in sync with `--help`
//!
//! The tool runs a command with its help flag and splices the output between
//! a pair of literal markers in a document, replacing the document atomically.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod splice;

// Re-export commonly used types
pub use error::{Result, ReadmeError};
pub use runner::{update, Outcome};

/// Current version of readme-update
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
