//! Error types for deterministic archive creation.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DetzipError`.
pub type Result<T> = std::result::Result<T, DetzipError>;

/// Errors that can occur while filtering sources or building an archive.
#[derive(Error, Debug)]
pub enum DetzipError {
    /// I/O operation failed while serializing the archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Exclusion pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser error from the glob implementation.
        source: glob::PatternError,
    },

    /// A listed source path does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A source path exists but could not be listed or read.
    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        /// The unreadable path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The archive cannot be created at the target location.
    #[error("cannot write archive {path}: {source}")]
    UnwritableDestination {
        /// Final archive path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The build request is incomplete.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is missing or wrong.
        reason: String,
    },

    /// A path cannot be represented as a ZIP entry name.
    #[error("path is not valid UTF-8: {path}")]
    InvalidEntryName {
        /// The path that could not be converted.
        path: PathBuf,
    },
}

impl DetzipError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the destination or the archive writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use detzip_core::DetzipError;
    /// use std::path::PathBuf;
    ///
    /// let err = DetzipError::SourceNotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(err.is_input_error());
    ///
    /// let err = DetzipError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::InvalidConfiguration { .. }
                | Self::SourceNotFound { .. }
                | Self::SourceUnreadable { .. }
                | Self::InvalidEntryName { .. }
        )
    }

    /// Returns the filesystem path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceUnreadable { path, .. }
            | Self::UnwritableDestination { path, .. }
            | Self::InvalidEntryName { path } => Some(path),
            Self::Io(_) | Self::InvalidPattern { .. } | Self::InvalidConfiguration { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = DetzipError::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid exclude pattern '['"));
        assert!(err.is_input_error());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_source_not_found_display() {
        let err = DetzipError::SourceNotFound {
            path: PathBuf::from("nope/file.txt"),
        };
        assert_eq!(err.to_string(), "source not found: nope/file.txt");
        assert_eq!(err.path(), Some(Path::new("nope/file.txt")));
    }

    #[test]
    fn test_unwritable_destination_is_not_input_error() {
        let err = DetzipError::UnwritableDestination {
            path: PathBuf::from("/readonly/out.zip"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_input_error());
        assert_eq!(err.path(), Some(Path::new("/readonly/out.zip")));
    }

    #[test]
    fn test_io_error_from() {
        let err: DetzipError = std::io::Error::other("boom").into();
        assert!(matches!(err, DetzipError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: boom");
    }
}
