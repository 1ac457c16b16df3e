//! Tool invocation
//!
//! This module runs the help-emitting tool: once quietly as a preflight
//! check, and once more to capture its help text.

use crate::config::ToolConfig;
use crate::error::{ConfigError, ReadmeError, ToolError, ToolResult};
use crate::runner::{interpolate_list, interpolate_map, interpolate_strict, Context};
use log::{debug, error};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};

/// A fully resolved tool command line with its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program to run
    pub program: String,

    /// Arguments, the help flag last
    pub args: Vec<String>,

    /// Variables set on the child process only
    pub env: BTreeMap<String, OsString>,

    /// Working directory of the child
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    /// Resolve a tool configuration against the context
    ///
    /// Interpolates the command and environment, loads the dotenv file and
    /// applies the search path adjustment.
    pub fn from_config(tool: &ToolConfig, ctx: &Context) -> Result<Self, ReadmeError> {
        let mut vars = ctx.vars.clone();
        let mut env_vars: BTreeMap<String, OsString> = BTreeMap::new();

        if let Some(dotenv) = &tool.dotenv {
            let path = ctx.resolve(&PathBuf::from(interpolate_strict(
                &dotenv.to_string_lossy(),
                &vars,
            )?));
            for (key, value) in load_dotenv(&path)? {
                vars.insert(key.clone(), value.clone());
                env_vars.insert(key, value.into());
            }
        }

        for (key, value) in interpolate_map(&tool.env, &vars)? {
            env_vars.insert(key, value.into());
        }

        if let Some(search_path) = &tool.search_path {
            let entries = search_path
                .entries
                .iter()
                .map(|entry| -> Result<PathBuf, ReadmeError> {
                    let entry = interpolate_strict(&entry.to_string_lossy(), &vars)?;
                    Ok(ctx.resolve(&PathBuf::from(entry)))
                })
                .collect::<Result<Vec<PathBuf>, ReadmeError>>()?;

            let current = env_vars
                .get(&search_path.var)
                .cloned()
                .or_else(|| env::var_os(&search_path.var));
            let joined = prepend_search_path(entries, current)?;
            debug!("{}={}", search_path.var, joined.to_string_lossy());
            env_vars.insert(search_path.var.clone(), joined);
        }

        let mut words = interpolate_list(&tool.command, &vars)?.into_iter();
        let program = words
            .next()
            .ok_or_else(|| ConfigError::Invalid("tool.command must name a program".to_string()))?;
        let mut args: Vec<String> = words.collect();
        args.push(tool.help_flag.clone());

        Ok(ToolInvocation {
            program,
            args,
            env: env_vars,
            working_dir: ctx.working_dir.clone(),
        })
    }

    /// Command line as a single string for messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> StdCommand {
        let mut command = StdCommand::new(&self.program);
        command.args(&self.args);
        command.current_dir(&self.working_dir);
        command.envs(&self.env);
        command.stdin(Stdio::null());
        command
    }

    /// Check that the tool runs, discarding its output
    ///
    /// On failure the tool is run once more with its output going to the
    /// terminal so the user sees why, then `ToolUnavailable` is returned.
    pub fn preflight(&self) -> ToolResult<()> {
        debug!("Preflight: {}", self.display());

        let mut command = self.command();
        command.stdout(Stdio::null());
        command.stderr(Stdio::null());

        let code = match command.status() {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => status.code(),
            Err(e) => {
                error!("Failed to start '{}': {}", self.program, e);
                None
            }
        };

        error!("'{}' failed, re-running for diagnostics", self.display());
        self.show_diagnostics();

        Err(ToolError::ToolUnavailable {
            program: self.program.clone(),
            code,
        })
    }

    fn show_diagnostics(&self) {
        let mut command = self.command();
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());
        if let Err(e) = command.status() {
            debug!("Diagnostic run of '{}' did not start: {}", self.program, e);
        }
    }

    /// Run the tool and capture its help text
    ///
    /// Standard output and standard error share one pipe, so the text keeps
    /// the order the tool wrote it in, as with `2>&1`. The bytes must be
    /// valid UTF-8; they are inserted verbatim.
    pub fn capture(&self) -> ToolResult<String> {
        let capture_error = |error: String| ToolError::Capture {
            program: self.program.clone(),
            error,
        };

        let (mut reader, writer) = io::pipe().map_err(|e| capture_error(e.to_string()))?;
        let stderr = writer.try_clone().map_err(|e| capture_error(e.to_string()))?;

        let mut command = self.command();
        command.stdout(writer);
        command.stderr(stderr);
        let mut child = command.spawn().map_err(|e| capture_error(e.to_string()))?;
        // The command still owns our copies of the write end; reading only
        // reaches EOF once they are closed.
        drop(command);

        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let status = child.wait().map_err(|e| capture_error(e.to_string()))?;
        read.map_err(|e| capture_error(e.to_string()))?;

        if !status.success() {
            return Err(capture_error(format!(
                "exited with code {:?}",
                status.code()
            )));
        }

        let text = String::from_utf8(bytes)
            .map_err(|e| capture_error(format!("help text is not valid UTF-8: {}", e)))?;
        debug!("Captured {} bytes of help text", text.len());
        Ok(text)
    }
}

/// Prepend `entries` to an existing path list
fn prepend_search_path(
    entries: Vec<PathBuf>,
    current: Option<OsString>,
) -> Result<OsString, ReadmeError> {
    let existing = current
        .as_deref()
        .map(|value| env::split_paths(value).collect::<Vec<_>>())
        .unwrap_or_default();

    env::join_paths(entries.into_iter().chain(existing)).map_err(|e| {
        ConfigError::Invalid(format!("search path entry cannot be joined: {}", e)).into()
    })
}

fn load_dotenv(path: &std::path::Path) -> Result<Vec<(String, String)>, ReadmeError> {
    let read_error = |e: dotenvy::Error| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let iter = dotenvy::from_path_iter(path).map_err(read_error)?;
    let mut pairs = Vec::new();
    for item in iter {
        pairs.push(item.map_err(read_error)?);
    }
    Ok(pairs)
}
