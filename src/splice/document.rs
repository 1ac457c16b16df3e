//! Document model and fragment extraction
//!
//! A document is handled as a sequence of lines that keep their terminators,
//! so every line outside the spliced region is written back byte for byte.

use crate::config::Markers;
use crate::error::{SpliceError, SpliceResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A text document read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    text: String,
}

/// Line indices of the first opening marker and the closing marker after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub open_line: usize,
    pub close_line: usize,
}

impl Document {
    /// Read a document from disk
    pub fn read(path: &Path) -> SpliceResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| SpliceError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(Self::from_text(path, text))
    }

    /// Wrap text that is already in memory
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Document {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines including their terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }

    /// Locate the spliced region
    ///
    /// The opening marker must appear on some line and the first line with
    /// the closing marker must come after it.
    pub fn locate(&self, markers: &Markers) -> SpliceResult<Region> {
        let open_line = self
            .lines()
            .position(|line| line.contains(&markers.open))
            .ok_or_else(|| SpliceError::NoMarkersFound {
                path: self.path.clone(),
                marker: markers.open.clone(),
            })?;

        match self.lines().position(|line| line.contains(&markers.close)) {
            Some(close_line) if close_line > open_line => Ok(Region {
                open_line,
                close_line,
            }),
            _ => Err(SpliceError::MissingClosingMarker {
                path: self.path.clone(),
                marker: markers.close.clone(),
            }),
        }
    }

    /// Lines up to and including the first one containing `open`
    pub fn before_fragment<'a>(&'a self, open: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        before_fragment(self.lines(), open)
    }

    /// Lines from the first one containing `close` to the end
    pub fn after_fragment<'a>(&'a self, close: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        after_fragment(self.lines(), close)
    }
}

/// Emit lines unchanged up to and including the first one containing
/// `open`, then stop without consuming the rest
pub fn before_fragment<'a, I>(lines: I, open: &'a str) -> impl Iterator<Item = &'a str> + 'a
where
    I: Iterator<Item = &'a str> + 'a,
{
    let mut found = false;
    lines.take_while(move |line| {
        if found {
            return false;
        }
        found = line.contains(open);
        true
    })
}

/// Suppress lines until one contains `close`, then emit it and everything
/// after it
pub fn after_fragment<'a, I>(lines: I, close: &'a str) -> impl Iterator<Item = &'a str> + 'a
where
    I: Iterator<Item = &'a str> + 'a,
{
    lines.skip_while(move |line| !line.contains(close))
}

/// Help text as lines, the last one terminated even if the tool did not
pub fn help_lines(help: &str) -> impl Iterator<Item = &str> {
    let missing_newline = !help.is_empty() && !help.ends_with('\n');
    help.split_inclusive('\n')
        .chain(missing_newline.then_some("\n"))
}

/// Build the new document: before-fragment, help text, after-fragment
pub fn assemble(document: &Document, help: &str, markers: &Markers) -> SpliceResult<String> {
    document.locate(markers)?;

    let mut buffer = String::with_capacity(document.text().len() + help.len());
    document
        .before_fragment(&markers.open)
        .chain(help_lines(help))
        .chain(document.after_fragment(&markers.close))
        .for_each(|line| buffer.push_str(line));

    Ok(buffer)
}
