//! Deterministic archive builder.
//!
//! Ties expansion, canonical ordering and serialization together and
//! publishes the archive atomically: content is written to a hidden
//! temporary file next to the target, synced, then renamed into place.

use crate::Configuration;
use crate::DetzipError;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::plan::plan_entries;
use crate::creation::report::CreationReport;
use crate::creation::walker::expand_sources;
use crate::creation::zip::write_archive;
use crate::normalize::with_archive_extension;
use std::path::Path;
use std::time::Instant;

/// Builds the archive described by `config`.
///
/// `config.source_files` is used as-is (filters are applied by the caller,
/// see [`crate::create_archive`]). On success `config.archive` holds the
/// final path with the `.zip` extension enforced.
///
/// # Errors
///
/// Returns an error if a source is missing or unreadable, the target
/// directory is not writable, or writing the archive fails. No file appears
/// at the final path on error.
#[tracing::instrument(skip_all, fields(archive = %config.archive.display()))]
pub fn build(
    config: &mut Configuration,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let start = Instant::now();
    let archive = with_archive_extension(&config.archive);

    let files = expand_sources(&config.source_files)?;
    let mut plan = plan_entries(files)?;

    let mut report = CreationReport::new(&archive);
    report.duplicates_collapsed = plan.duplicates;

    if let Some(previous) = plan.remove_archive(&archive) {
        tracing::warn!(path = %previous.source.display(), "skipping previous archive found among sources");
        report.files_skipped += 1;
        report.add_warning(format!(
            "Skipped previous archive: {}",
            previous.source.display()
        ));
    }

    // Created after expansion so the temporary file is never walked.
    let temp = temp_builder()
        .tempfile_in(parent_dir(&archive))
        .map_err(|source| DetzipError::UnwritableDestination {
            path: archive.clone(),
            source,
        })?;
    tracing::debug!(temp = %temp.path().display(), entries = plan.entries.len(), "writing archive");

    let temp = write_archive(temp, &plan.entries, config.compression, &mut report, progress)?;
    temp.as_file().sync_all()?;
    report.bytes_compressed = temp.as_file().metadata()?.len();

    temp.persist(&archive)
        .map_err(|e| DetzipError::UnwritableDestination {
            path: archive.clone(),
            source: e.error,
        })?;
    sync_dir(parent_dir(&archive));

    report.duration = start.elapsed();
    tracing::info!(
        archive = %archive.display(),
        files = report.files_added,
        bytes = report.bytes_compressed,
        "archive published"
    );

    config.archive = archive;
    progress.on_complete();

    Ok(report)
}

/// Temporary file settings. On unix the file is opened with `0o666` so the
/// process umask applies, as for any newly created file, instead of
/// tempfile's private `0o600`.
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".detzip-").suffix(".tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder
}

/// Directory the archive is published in; `.` for bare file names.
fn parent_dir(archive: &Path) -> &Path {
    match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Flushes the rename to disk so the published name survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(dir = %dir.display(), error = %e, "failed to sync archive directory");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
