//! Archive creation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of one archive build.
///
/// # Examples
///
/// ```
/// use detzip_core::CreationReport;
///
/// let mut report = CreationReport::new("out.zip");
/// report.files_added = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Final archive path, with the `.zip` extension enforced.
    pub archive_path: PathBuf,

    /// Number of entries written.
    pub files_added: usize,

    /// Number of input paths that resolved to an entry already present.
    pub duplicates_collapsed: usize,

    /// Number of files left out (e.g. the previous archive itself).
    pub files_skipped: usize,

    /// Total source bytes copied into the archive (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Wall-clock duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates an empty report for `archive_path`.
    #[must_use]
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            ..Self::default()
        }
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if nothing was written or the archive is larger than its
    /// content (ZIP headers dominate for small or stored inputs).
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 || self.bytes_compressed >= self.bytes_written {
            return 0.0;
        }
        let saved = self.bytes_written - self.bytes_compressed;
        (saved as f64 / self.bytes_written as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_empty() {
        let report = CreationReport::new("a.zip");
        assert_eq!(report.archive_path, PathBuf::from("a.zip"));
        assert_eq!(report.files_added, 0);
        assert!(!report.has_warnings());
        assert_eq!(report.compression_ratio(), 0.0);
        assert_eq!(report.compression_percentage(), 0.0);
    }

    #[test]
    fn test_warnings() {
        let mut report = CreationReport::default();
        report.add_warning("skipped previous archive");
        assert!(report.has_warnings());
        assert_eq!(report.warnings, vec!["skipped previous archive".to_string()]);
    }

    #[test]
    fn test_archive_larger_than_content() {
        let mut report = CreationReport::default();
        report.bytes_written = 10;
        report.bytes_compressed = 130;
        assert_eq!(report.compression_percentage(), 0.0);
        assert!(report.compression_ratio() < 1.0);
    }
}
