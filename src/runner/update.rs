//! The readme update operation

use crate::config::{validate_config, Config};
use crate::error::{ReadmeError, SpliceError};
use crate::runner::{interpolate_strict, Context, Mode, ToolInvocation};
use crate::splice::{assemble, write_atomic, Document};
use log::{debug, info};
use std::path::PathBuf;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was rewritten
    Updated(PathBuf),
    /// The document already held the current help text
    Unchanged(PathBuf),
    /// Dry run: the assembled document, not written
    Printed(String),
}

/// Regenerate the help section of the configured document
///
/// Runs the tool once as a preflight check, locates the markers, captures the
/// help text and splices it in. The document on disk is either fully
/// replaced or left untouched.
pub fn update(config: &Config, ctx: &Context) -> Result<Outcome, ReadmeError> {
    validate_config(config)?;

    let invocation = ToolInvocation::from_config(&config.tool, ctx)?;
    invocation.preflight()?;

    let document_path = ctx.resolve(&PathBuf::from(interpolate_strict(
        &config.document.to_string_lossy(),
        &ctx.vars,
    )?));
    let document = Document::read(&document_path)?;
    let region = document.locate(&config.markers)?;
    debug!(
        "Markers found on lines {} and {} of {}",
        region.open_line + 1,
        region.close_line + 1,
        document_path.display()
    );

    let help = invocation.capture()?;
    if help.trim().is_empty() {
        return Err(SpliceError::EmptyHelpText.into());
    }

    let assembled = assemble(&document, &help, &config.markers)?;
    if assembled.is_empty() {
        return Err(SpliceError::AssemblyEmpty.into());
    }

    let unchanged = assembled == document.text();
    match ctx.mode {
        Mode::DryRun => Ok(Outcome::Printed(assembled)),
        Mode::Check if unchanged => {
            info!("{} is up to date", document_path.display());
            Ok(Outcome::Unchanged(document_path))
        }
        Mode::Check => Err(SpliceError::OutOfDate {
            path: document_path,
        }
        .into()),
        Mode::Write if unchanged => {
            info!("{} already up to date", document_path.display());
            Ok(Outcome::Unchanged(document_path))
        }
        Mode::Write => {
            write_atomic(&document_path, &assembled)?;
            info!("Updated {}", document_path.display());
            Ok(Outcome::Updated(document_path))
        }
    }
}
