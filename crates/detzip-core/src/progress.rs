//! Progress reporting for archive creation.

use std::path::Path;

/// Callback trait for progress reporting while an archive is written.
///
/// Entries are reported in canonical (sorted) order, the order in which they
/// are written.
///
/// # Examples
///
/// ```
/// use detzip_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is written.
    ///
    /// * `path` - Entry name inside the archive
    /// * `total` - Number of entries in the archive
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of source content copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once the archive has been published at its final path.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
