//! High-level public API for deterministic archive creation.

use std::path::Path;
use std::path::PathBuf;

use crate::Compression;
use crate::Configuration;
use crate::DetzipError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation;
use crate::creation::CreationReport;
use crate::filter::apply_filters;
use crate::filter::default_filters;

/// Filters the sources of `config` and builds the archive.
///
/// The caller's source list is left as supplied; filtering works on a copy.
/// On success `config.archive` holds the final archive path (with `.zip`
/// appended when it was missing).
///
/// # Errors
///
/// Returns an error if:
/// - An exclusion pattern is malformed
/// - A source does not exist or cannot be read
/// - The target directory is not writable
/// - Writing the archive fails
///
/// # Examples
///
/// ```no_run
/// use detzip_core::Configuration;
/// use detzip_core::create_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Configuration::new("dist/site")
///     .with_source_files(vec!["public".into()])
///     .with_exclude(vec!["*.map".to_string()]);
/// let report = create_archive(&mut config)?;
/// println!("{} -> {}", report.files_added, config.archive.display());
/// # Ok(())
/// # }
/// ```
pub fn create_archive(config: &mut Configuration) -> Result<CreationReport> {
    create_archive_with_progress(config, &mut NoopProgress)
}

/// Like [`create_archive`], reporting progress through `progress`.
///
/// # Errors
///
/// See [`create_archive`].
pub fn create_archive_with_progress(
    config: &mut Configuration,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let mut narrowed = apply_filters(config, &default_filters())?;
    let report = creation::build(&mut narrowed, progress)?;
    config.archive = narrowed.archive;
    Ok(report)
}

/// Builder for creating archives with a fluent API.
///
/// # Examples
///
/// ```no_run
/// use detzip_core::ArchiveCreator;
/// use detzip_core::Compression;
///
/// let report = ArchiveCreator::new()
///     .output("release")
///     .add_source("target/release/app")
///     .add_source("README.md")
///     .exclude("*.d")
///     .compression(Compression::Deflate)
///     .create()?;
///
/// assert!(report.archive_path.ends_with("release.zip"));
/// # Ok::<(), detzip_core::DetzipError>(())
/// ```
#[derive(Debug, Default)]
pub struct ArchiveCreator {
    output_path: Option<PathBuf>,
    config: Configuration,
    recurse: bool,
}

impl ArchiveCreator {
    /// Creates a new `ArchiveCreator` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output archive path. `.zip` is appended if missing.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a source file or directory.
    #[must_use]
    pub fn add_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.source_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds multiple source files or directories.
    ///
    /// # Examples
    ///
    /// ```
    /// use detzip_core::ArchiveCreator;
    ///
    /// let creator = ArchiveCreator::new().sources(&["src/", "Cargo.toml", "README.md"]);
    /// ```
    #[must_use]
    pub fn sources<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.config
            .source_files
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Adds an exclusion pattern.
    #[must_use]
    pub fn exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.config.exclude.push(pattern.into());
        self
    }

    /// Sets the compression mode.
    #[must_use]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    /// Expands directory sources before exclusion patterns are applied, so
    /// patterns also see nested files.
    #[must_use]
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Returns the configuration assembled so far.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Creates the archive.
    ///
    /// An empty source list is valid and produces an empty archive.
    ///
    /// # Errors
    ///
    /// Returns [`DetzipError::InvalidConfiguration`] if no output path was
    /// set, otherwise the errors of [`create_archive`].
    pub fn create(self) -> Result<CreationReport> {
        self.create_with_progress(&mut NoopProgress)
    }

    /// Creates the archive, reporting progress through `progress`.
    ///
    /// # Errors
    ///
    /// See [`ArchiveCreator::create`].
    pub fn create_with_progress(
        self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        let output_path = self
            .output_path
            .ok_or_else(|| DetzipError::InvalidConfiguration {
                reason: "output path not set".to_string(),
            })?;

        let mut config = self.config.with_archive(output_path);
        if self.recurse {
            config = config.with_expanded_sources()?;
        }

        create_archive_with_progress(&mut config, progress)
    }
}
