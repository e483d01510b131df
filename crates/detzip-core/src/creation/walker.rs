//! Expansion of source paths into regular files.
//!
//! Directories are walked recursively and contribute only the regular files
//! beneath them. Walk order is whatever the filesystem returns; callers that
//! need a stable order sort afterwards.

use crate::DetzipError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Kind of a source path after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,
}

/// A source path together with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Path as given by the caller.
    pub path: PathBuf,

    /// File or directory.
    pub kind: EntryKind,
}

impl CandidateEntry {
    /// Classifies `path`, following symlinks.
    ///
    /// Returns `Ok(None)` for special files (sockets, FIFOs, devices), which
    /// are never archived.
    ///
    /// # Errors
    ///
    /// Returns [`DetzipError::SourceNotFound`] if the path (or the target of
    /// a symlink) does not exist, and [`DetzipError::SourceUnreadable`] if
    /// its metadata cannot be read.
    pub fn classify(path: &Path) -> Result<Option<Self>> {
        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                DetzipError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DetzipError::SourceUnreadable {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            tracing::debug!(path = %path.display(), "skipping special file");
            return Ok(None);
        };

        Ok(Some(Self {
            path: path.to_path_buf(),
            kind,
        }))
    }
}

/// Expands `sources` into the regular files they denote.
///
/// Files are returned as given; directories are replaced by every regular
/// file beneath them, with paths built by joining onto the directory path as
/// given. The result may contain duplicates when sources overlap.
///
/// # Examples
///
/// ```no_run
/// use detzip_core::creation::walker::expand_sources;
/// use std::path::PathBuf;
///
/// let files = expand_sources(&[PathBuf::from("src"), PathBuf::from("Cargo.toml")])?;
/// for file in &files {
///     println!("{}", file.display());
/// }
/// # Ok::<(), detzip_core::DetzipError>(())
/// ```
///
/// # Errors
///
/// Returns an error if a source does not exist or a directory cannot be
/// read.
pub fn expand_sources<P: AsRef<Path>>(sources: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for source in sources {
        let Some(candidate) = CandidateEntry::classify(source.as_ref())? else {
            continue;
        };

        match candidate.kind {
            EntryKind::File => files.push(candidate.path),
            EntryKind::Directory => walk_directory(&candidate.path, &mut files)?,
        }
    }

    Ok(files)
}

/// Collects the regular files beneath `root` into `files`.
fn walk_directory(root: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let before = files.len();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_skippable(&err) => {
                tracing::debug!(error = %err, "skipping unresolvable entry");
                continue;
            }
            Err(err) => return Err(walk_error(root, err)),
        };

        let file_type = entry.file_type();
        if file_type.is_file() {
            files.push(entry.into_path());
        } else if !file_type.is_dir() {
            tracing::debug!(path = %entry.path().display(), "skipping special file");
        }
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len() - before,
        "directory expanded"
    );
    Ok(())
}

/// Broken symlinks and symlink loops are skipped rather than failing the
/// build.
fn is_skippable(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return true;
    }
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    not_found
        && err.path().is_some_and(|path| {
            fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
        })
}

fn walk_error(root: &Path, err: walkdir::Error) -> DetzipError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("directory walk failed"));
    DetzipError::SourceUnreadable { path, source }
}
