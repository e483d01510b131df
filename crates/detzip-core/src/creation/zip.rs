//! ZIP serialization with normalized entry metadata.

use crate::Compression;
use crate::DetzipError;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::plan::ArchiveEntry;
use crate::creation::report::CreationReport;
use crate::normalize::DEFLATE_LEVEL;
use crate::normalize::FILE_MODE;
use crate::normalize::MODIFIED_TIMESTAMP;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Returns the per-entry options shared by every entry of an archive.
///
/// Only the compression mode varies; timestamp, permissions and deflate
/// level are the normalization constants.
///
/// # Errors
///
/// Returns an error if the normalized timestamp cannot be encoded.
pub fn entry_options(compression: Compression) -> Result<SimpleFileOptions> {
    let options = SimpleFileOptions::default()
        .last_modified_time(MODIFIED_TIMESTAMP.to_zip()?)
        .unix_permissions(FILE_MODE);

    Ok(match compression {
        Compression::Store => options.compression_method(CompressionMethod::Stored),
        Compression::Deflate => options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL)),
    })
}

/// Writes `entries`, in the order given, as a ZIP archive into `writer`.
///
/// Callers pass entries in canonical order (see
/// [`plan_entries`](crate::creation::plan::plan_entries)); the writer never
/// reorders them. Returns the underlying writer once the central directory
/// has been written.
///
/// # Errors
///
/// Returns [`DetzipError::SourceUnreadable`] if an entry's content cannot be
/// read and [`DetzipError::Io`] if writing the archive fails.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    entries: &[ArchiveEntry],
    compression: Compression,
    report: &mut CreationReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = entry_options(compression)?;
    let total = entries.len();

    // Reusable buffer for file copying
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        let name = Path::new(&entry.name);
        progress.on_entry_start(name, total, idx + 1);

        let bytes = add_file(&mut zip, entry, options, progress, &mut buffer)?;
        report.files_added += 1;
        report.bytes_written += bytes;

        tracing::debug!(entry = %entry.name, bytes, "entry written");
        progress.on_entry_complete(name);
    }

    let writer = zip
        .finish()
        .map_err(|e| std::io::Error::other(format!("failed to finish ZIP archive: {e}")))?;
    Ok(writer)
}

/// Streams one file into the archive and returns the number of bytes copied.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &ArchiveEntry,
    options: SimpleFileOptions,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<u64> {
    let unreadable = |source| DetzipError::SourceUnreadable {
        path: entry.source.clone(),
        source,
    };

    // Open before starting the entry so a vanished file leaves no header.
    let mut file = File::open(&entry.source).map_err(unreadable)?;
    let size = file.metadata().map_err(unreadable)?.len();

    // Zip64 extra fields only for entries that need them.
    let options = options.large_file(size >= ZIP64_THRESHOLD);

    zip.start_file(entry.name.as_str(), options)
        .map_err(|e| std::io::Error::other(format!("failed to start file in ZIP: {e}")))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer).map_err(unreadable)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use crate::creation::plan::plan_entries;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_to_vec(entries: &[ArchiveEntry], compression: Compression) -> Vec<u8> {
        let mut report = CreationReport::default();
        let cursor = write_archive(
            Cursor::new(Vec::new()),
            entries,
            compression,
            &mut report,
            &mut NoopProgress,
        )
        .unwrap();
        cursor.into_inner()
    }

    fn sample_entries(temp: &TempDir) -> Vec<ArchiveEntry> {
        fs::write(temp.path().join("b.txt"), "b".repeat(500)).unwrap();
        fs::write(temp.path().join("a.txt"), "hello deterministic zip").unwrap();
        plan_entries(vec![temp.path().join("b.txt"), temp.path().join("a.txt")])
            .unwrap()
            .entries
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let data = write_to_vec(&[], Compression::Deflate);
        // End of central directory record only.
        assert_eq!(&data[0..4], b"PK\x05\x06");
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_entries_have_normalized_metadata() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        let data = write_to_vec(&entries, Compression::Deflate);

        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
        for i in 0..archive.len() {
            let file = archive.by_index(i).unwrap();
            assert!(MODIFIED_TIMESTAMP.matches(&file.last_modified().unwrap()));
            assert_eq!(file.unix_mode().unwrap() & 0o777, FILE_MODE);
            assert!(file.is_file());
            assert_eq!(file.compression(), CompressionMethod::Deflated);
        }
    }

    #[test]
    fn test_entries_keep_given_order() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        let data = write_to_vec(&entries, Compression::Store);

        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let names: Vec<_> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        let expected: Vec<_> = entries.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_store_keeps_content_verbatim() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        let data = write_to_vec(&entries, Compression::Store);

        let needle = b"hello deterministic zip";
        assert!(data.windows(needle.len()).any(|w| w == needle));

        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let mut file = archive.by_name(&entries[0].name).unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello deterministic zip");
    }

    #[test]
    fn test_same_input_same_bytes() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        for compression in [Compression::Store, Compression::Deflate] {
            assert_eq!(
                write_to_vec(&entries, compression),
                write_to_vec(&entries, compression)
            );
        }
    }

    #[test]
    fn test_compression_mode_changes_bytes_not_content() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        let stored = write_to_vec(&entries, Compression::Store);
        let deflated = write_to_vec(&entries, Compression::Deflate);
        assert_ne!(stored, deflated);

        let mut a = zip::ZipArchive::new(Cursor::new(stored)).unwrap();
        let mut b = zip::ZipArchive::new(Cursor::new(deflated)).unwrap();
        for entry in &entries {
            let mut left = Vec::new();
            let mut right = Vec::new();
            a.by_name(&entry.name).unwrap().read_to_end(&mut left).unwrap();
            b.by_name(&entry.name).unwrap().read_to_end(&mut right).unwrap();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn test_report_counts() {
        let temp = TempDir::new().unwrap();
        let entries = sample_entries(&temp);
        let mut report = CreationReport::default();
        write_archive(
            Cursor::new(Vec::new()),
            &entries,
            Compression::Deflate,
            &mut report,
            &mut NoopProgress,
        )
        .unwrap();
        assert_eq!(report.files_added, 2);
        assert_eq!(report.bytes_written, 523);
    }

    #[test]
    fn test_vanished_source_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let entries = vec![ArchiveEntry {
            name: "gone.txt".to_string(),
            source: temp.path().join("gone.txt"),
        }];
        let mut report = CreationReport::default();
        let err = write_archive(
            Cursor::new(Vec::new()),
            &entries,
            Compression::Store,
            &mut report,
            &mut NoopProgress,
        )
        .unwrap_err();
        assert!(matches!(err, DetzipError::SourceUnreadable { .. }));
    }
}
