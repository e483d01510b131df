//! Error conversion utilities for CLI.
//!
//! Converts detzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use detzip_core::DetzipError;
use std::path::Path;

/// Converts `DetzipError` to user-friendly anyhow error with context
pub fn convert_creation_error(err: DetzipError, archive: &Path) -> anyhow::Error {
    match err {
        DetzipError::InvalidPattern { pattern, source } => {
            anyhow!(
                "Invalid exclude pattern '{pattern}': {source}\n\
                 HINT: Patterns are shell-style globs such as '*.log' or '.git/*'. \
                 Quote them so the shell does not expand them."
            )
        }
        DetzipError::SourceNotFound { path } => {
            anyhow!(
                "Source not found: {}\n\
                 HINT: Source paths are resolved relative to the current directory.",
                path.display()
            )
        }
        DetzipError::SourceUnreadable { path, source } => {
            anyhow!(
                "Cannot read source '{}': {source}\n\
                 HINT: Check the file permissions, or exclude it with -x.",
                path.display()
            )
        }
        DetzipError::UnwritableDestination { path, source } => {
            anyhow!(
                "Cannot write archive '{}': {source}\n\
                 HINT: The target directory must exist and be writable.",
                path.display()
            )
        }
        DetzipError::InvalidEntryName { path } => {
            anyhow!(
                "Cannot store '{}' in a ZIP archive: path is not valid UTF-8\n\
                 HINT: Rename the file or exclude it with -x.",
                path.display()
            )
        }
        DetzipError::Io(io_err) => {
            anyhow!(
                "I/O error while writing '{}': {}",
                archive.display(),
                io_err
            )
        }
        DetzipError::InvalidConfiguration { .. } => anyhow::Error::from(err)
            .context(format!("Error creating archive '{}'", archive.display())),
    }
}

/// Adds context to a core result about the archive being created
pub fn add_archive_context<T>(
    result: Result<T, DetzipError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_creation_error(e, archive))
}
