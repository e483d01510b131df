//! Configuration for a single archive build.

use crate::Result;
use crate::creation::walker;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Compression applied to every entry of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Entries are stored verbatim.
    Store,

    /// Entries are deflated at a fixed level.
    #[default]
    Deflate,
}

impl Compression {
    /// Returns the lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Deflate => "deflate",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "store" => Ok(Self::Store),
            "deflate" => Ok(Self::Deflate),
            other => Err(format!(
                "unknown compression method '{other}' (expected 'store' or 'deflate')"
            )),
        }
    }
}

/// Configuration for one archive build.
///
/// Created once per invocation. Filters return a narrowed copy instead of
/// mutating the caller's value; the builder writes the final archive path
/// (with the `.zip` extension enforced) back into `archive`.
///
/// # Examples
///
/// ```
/// use detzip_core::Compression;
/// use detzip_core::Configuration;
///
/// let config = Configuration::new("out")
///     .with_source_files(vec!["src".into()])
///     .with_exclude(vec!["*.log".to_string()])
///     .with_compression(Compression::Store);
///
/// assert_eq!(config.source_files.len(), 1);
/// assert_eq!(config.compression, Compression::Store);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Source files and directories, in caller order. May contain
    /// duplicates.
    pub source_files: Vec<PathBuf>,

    /// Glob patterns; a source matching any of them is dropped.
    pub exclude: Vec<String>,

    /// Target archive path. The `.zip` extension is appended on build if
    /// missing.
    pub archive: PathBuf,

    /// Compression mode for all entries.
    pub compression: Compression,
}

impl Configuration {
    /// Creates a configuration targeting `archive` with no sources.
    #[must_use]
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            ..Self::default()
        }
    }

    /// Sets the source paths.
    #[must_use]
    pub fn with_source_files(mut self, sources: Vec<PathBuf>) -> Self {
        self.source_files = sources;
        self
    }

    /// Sets the exclusion patterns.
    #[must_use]
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Sets the target archive path.
    #[must_use]
    pub fn with_archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = archive.into();
        self
    }

    /// Sets the compression mode.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Returns a copy whose sources are the regular files reachable from the
    /// original sources.
    ///
    /// Directories are replaced by the files beneath them so that exclusion
    /// patterns are matched against nested paths too.
    ///
    /// # Errors
    ///
    /// Returns an error if a source does not exist or a directory cannot be
    /// walked.
    pub fn with_expanded_sources(&self) -> Result<Self> {
        let files = walker::expand_sources(&self.source_files)?;
        Ok(Self {
            source_files: files,
            ..self.clone()
        })
    }
}
