//! Normalization constants and path rules shared by every archive.
//!
//! These values replace per-file filesystem metadata so that the archive
//! bytes depend only on entry names and contents.

use crate::DetzipError;
use crate::Result;
use std::ffi::OsString;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Extension enforced on every archive path.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Permission bits recorded for every entry.
pub const FILE_MODE: u32 = 0o644;

/// Deflate level used for [`Compression::Deflate`](crate::Compression).
pub const DEFLATE_LEVEL: i64 = 6;

/// Modification time recorded for every entry.
///
/// 1980-01-01 00:00:00 is the earliest MS-DOS timestamp; DOS time carries no
/// zone, so the value reads identically everywhere.
pub const MODIFIED_TIMESTAMP: Timestamp = Timestamp {
    year: 1980,
    month: 1,
    day: 1,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Calendar timestamp in MS-DOS resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Year (1980..=2107).
    pub year: u16,
    /// Month (1..=12).
    pub month: u8,
    /// Day of month (1..=31).
    pub day: u8,
    /// Hour (0..=23).
    pub hour: u8,
    /// Minute (0..=59).
    pub minute: u8,
    /// Second (0..=58, even).
    pub second: u8,
}

impl Timestamp {
    /// Converts to the ZIP writer's timestamp type.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside the DOS time range.
    pub fn to_zip(self) -> Result<zip::DateTime> {
        zip::DateTime::from_date_and_time(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
        .map_err(|e| {
            DetzipError::Io(std::io::Error::other(format!(
                "timestamp {self:?} is not representable in ZIP: {e}"
            )))
        })
    }

    /// Returns `true` if `other` carries the same calendar fields.
    #[must_use]
    pub fn matches(self, other: &zip::DateTime) -> bool {
        self.year == other.year()
            && self.month == other.month()
            && self.day == other.day()
            && self.hour == other.hour()
            && self.minute == other.minute()
            && self.second == other.second()
    }
}

/// Appends [`ARCHIVE_EXTENSION`] unless the path already ends with it.
///
/// The check is case-sensitive: `out.ZIP` becomes `out.ZIP.zip`.
///
/// # Examples
///
/// ```
/// use detzip_core::normalize::with_archive_extension;
/// use std::path::Path;
///
/// assert_eq!(with_archive_extension(Path::new("dist/app")), Path::new("dist/app.zip"));
/// assert_eq!(with_archive_extension(Path::new("app.zip")), Path::new("app.zip"));
/// assert_eq!(with_archive_extension(Path::new("app.tar")), Path::new("app.tar.zip"));
/// ```
#[must_use]
pub fn with_archive_extension(path: &Path) -> PathBuf {
    if path
        .as_os_str()
        .as_encoded_bytes()
        .ends_with(ARCHIVE_EXTENSION.as_bytes())
    {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Converts a filesystem path into a ZIP entry name.
///
/// The path is cleaned lexically: `.` components and repeated separators are
/// dropped, so `./dir/file` and `dir/file` name the same entry. It is never
/// re-rooted or made absolute, and `..` is kept as written. ZIP requires
/// forward slashes, so Windows separators are converted.
///
/// # Examples
///
/// ```
/// use detzip_core::normalize::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name(Path::new("./testdata/./file.txt")).unwrap(), "testdata/file.txt");
/// ```
///
/// # Errors
///
/// Returns [`DetzipError::InvalidEntryName`] if the path is not valid UTF-8.
pub fn entry_name(path: &Path) -> Result<String> {
    let cleaned: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    let name = cleaned.to_str().ok_or_else(|| DetzipError::InvalidEntryName {
        path: path.to_path_buf(),
    })?;

    #[cfg(windows)]
    let name = name.replace('\\', "/");

    #[cfg(not(windows))]
    let name = name.to_string();

    Ok(name)
}
