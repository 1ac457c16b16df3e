//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, logger setup and dispatch to
//! the update operation.

pub mod app;

// Re-export main types
pub use app::*;
