//! Execution context for a readme update
//!
//! The context tracks everything the update needs besides the configuration
//! itself: where relative paths resolve, which variables interpolation sees,
//! how loud to be and what to do with the assembled document.

use log::LevelFilter;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Variable holding the directory relative config paths resolve against
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";

/// Execution context for a single update run
pub struct Context {
    /// Directory relative paths are resolved against
    pub working_dir: PathBuf,

    /// Variables visible to interpolation (before the environment)
    pub vars: BTreeMap<String, String>,

    /// Verbosity level
    pub verbosity: Verbosity,

    /// What to do with the assembled document
    pub mode: Mode,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Log level filter matching this verbosity
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::Off,
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Normal => LevelFilter::Info,
            Verbosity::Verbose => LevelFilter::Debug,
        }
    }
}

/// Disposition of the assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Replace the document on disk
    Write,
    /// Compare with the document on disk, never write
    Check,
    /// Print the assembled document to stdout, never write
    DryRun,
}

impl Context {
    /// Create a new context rooted at the current directory
    pub fn new() -> Self {
        let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_root(working_dir)
    }

    fn with_root(working_dir: PathBuf) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert(
            CONFIG_DIR_VAR.to_string(),
            working_dir.display().to_string(),
        );

        Context {
            working_dir,
            vars,
            verbosity: Verbosity::Normal,
            mode: Mode::Write,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.vars
            .insert(CONFIG_DIR_VAR.to_string(), dir.display().to_string());
        self.working_dir = dir;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the document disposition
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
