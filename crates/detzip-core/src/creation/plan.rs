//! Deduplication and canonical ordering of archive entries.

use crate::Result;
use crate::normalize::entry_name;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// One file to be written into the archive.
///
/// Timestamp and permission bits are not carried here: every entry receives
/// the values from [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name: the path as given or discovered, with `/` separators.
    pub name: String,

    /// Filesystem path the content is read from.
    pub source: PathBuf,
}

/// The ordered, duplicate-free entry list of one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPlan {
    /// Entries in byte-wise lexicographic order of their names.
    pub entries: Vec<ArchiveEntry>,

    /// Number of input paths that collapsed onto an existing entry.
    pub duplicates: usize,
}

impl EntryPlan {
    /// Removes the entry that refers to the file at `archive`, if any.
    ///
    /// Guards against archiving the previous output of the same build when
    /// the target lies inside a source directory.
    pub fn remove_archive(&mut self, archive: &Path) -> Option<ArchiveEntry> {
        let archive_name = archive.file_name()?;
        let archive_real = fs::canonicalize(archive).ok()?;

        let position = self.entries.iter().position(|entry| {
            entry.source.file_name() == Some(archive_name)
                && fs::canonicalize(&entry.source).is_ok_and(|real| real == archive_real)
        })?;
        Some(self.entries.remove(position))
    }

    /// Returns `true` if the archive will contain no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deduplicates `files` by entry name and sorts them canonically.
///
/// The sort is applied unconditionally: it is what makes the archive
/// independent of input order and of directory-walk order.
///
/// # Examples
///
/// ```
/// use detzip_core::creation::plan::plan_entries;
/// use std::path::PathBuf;
///
/// let plan = plan_entries(vec![
///     PathBuf::from("b.txt"),
///     PathBuf::from("a/z.txt"),
///     PathBuf::from("b.txt"),
/// ])
/// .unwrap();
///
/// let names: Vec<_> = plan.entries.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["a/z.txt", "b.txt"]);
/// assert_eq!(plan.duplicates, 1);
/// ```
///
/// # Errors
///
/// Returns [`crate::DetzipError::InvalidEntryName`] if a path is not valid
/// UTF-8.
pub fn plan_entries(files: Vec<PathBuf>) -> Result<EntryPlan> {
    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut duplicates = 0;

    for source in files {
        let name = entry_name(&source)?;
        if by_name.contains_key(&name) {
            duplicates += 1;
            continue;
        }
        by_name.insert(name, source);
    }

    let entries = by_name
        .into_iter()
        .map(|(name, source)| ArchiveEntry { name, source })
        .collect();

    Ok(EntryPlan {
        entries,
        duplicates,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(plan: &EntryPlan) -> Vec<&str> {
        plan.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_plan_sorts_bytewise() {
        let plan = plan_entries(vec![
            PathBuf::from("testdata/file.txt"),
            PathBuf::from("testdata/folder/file.txt"),
            PathBuf::from("B.txt"),
            PathBuf::from("a.txt"),
        ])
        .unwrap();
        // Uppercase sorts before lowercase; '.' (0x2E) before '/' (0x2F).
        assert_eq!(
            names(&plan),
            ["B.txt", "a.txt", "testdata/file.txt", "testdata/folder/file.txt"]
        );
    }

    #[test]
    fn test_plan_dedups() {
        let plan = plan_entries(vec![
            PathBuf::from("x"),
            PathBuf::from("x"),
            PathBuf::from("y"),
            PathBuf::from("x"),
        ])
        .unwrap();
        assert_eq!(names(&plan), ["x", "y"]);
        assert_eq!(plan.duplicates, 2);
    }

    #[test]
    fn test_plan_dedups_current_dir_spellings() {
        let plan = plan_entries(vec![
            PathBuf::from("./testdata/file.txt"),
            PathBuf::from("testdata/file.txt"),
            PathBuf::from("testdata/./folder/file.txt"),
            PathBuf::from("./testdata/folder/file.txt"),
        ])
        .unwrap();
        assert_eq!(names(&plan), ["testdata/file.txt", "testdata/folder/file.txt"]);
        assert_eq!(plan.duplicates, 2);
    }

    #[test]
    fn test_plan_is_order_independent() {
        let forward = plan_entries(vec!["a".into(), "b/c".into(), "b".into()]).unwrap();
        let backward = plan_entries(vec!["b".into(), "b/c".into(), "a".into()]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_plan_empty() {
        let plan = plan_entries(Vec::new()).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.duplicates, 0);
    }

    #[test]
    fn test_remove_archive_drops_previous_output() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("out.zip");
        std::fs::write(&archive, "old archive").unwrap();
        std::fs::write(temp.path().join("keep.txt"), "keep").unwrap();

        let mut plan =
            plan_entries(vec![temp.path().join("keep.txt"), archive.clone()]).unwrap();
        let removed = plan.remove_archive(&archive).unwrap();
        assert_eq!(removed.source, archive);
        assert_eq!(plan.entries.len(), 1);
    }

    #[test]
    fn test_remove_archive_without_existing_output() {
        let temp = TempDir::new().unwrap();
        let mut plan = plan_entries(vec![temp.path().join("a.txt")]).unwrap();
        assert!(plan.remove_archive(&temp.path().join("out.zip")).is_none());
        assert_eq!(plan.entries.len(), 1);
    }

    #[test]
    fn test_remove_archive_ignores_same_name_elsewhere() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let archive = temp.path().join("out.zip");
        let other = temp.path().join("sub/out.zip");
        std::fs::write(&archive, "a").unwrap();
        std::fs::write(&other, "b").unwrap();

        let mut plan = plan_entries(vec![other]).unwrap();
        assert!(plan.remove_archive(&archive).is_none());
        assert_eq!(plan.entries.len(), 1);
    }
}
