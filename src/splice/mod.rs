//! Document splicing
//!
//! This module locates the marker pair in a document, builds the new text
//! around the captured help output and commits it to disk.

pub mod commit;
pub mod document;

// Re-export main types
pub use commit::*;
pub use document::*;
