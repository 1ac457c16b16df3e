//! Atomic document replacement

use crate::error::{SpliceError, SpliceResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` without ever leaving a partial file behind.
///
/// The content goes to a temporary file in the same directory (same
/// filesystem, so the rename is atomic) which is then renamed over the
/// target. The temporary file is removed if anything fails before the
/// rename. A symlinked target is followed, so the link survives and its
/// destination gets the new content. Empty content is refused.
pub fn write_atomic(path: &Path, content: &str) -> SpliceResult<()> {
    if content.is_empty() {
        return Err(SpliceError::AssemblyEmpty);
    }

    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();

    let write_error = |e: std::io::Error| SpliceError::Write {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(content.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    // Keep the original file mode; tempfile creates 0600 files
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions()).map_err(write_error)?;
    }

    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
