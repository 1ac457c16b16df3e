//! Update execution engine
//!
//! This module runs the help-emitting tool, resolves configuration values
//! against the execution context and drives the update operation.

pub mod command;
pub mod context;
pub mod interpolate;
pub mod update;

// Re-export main types
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use update::*;
