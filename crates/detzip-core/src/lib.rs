//! Byte-for-byte reproducible ZIP archive creation.
//!
//! `detzip-core` turns a set of filesystem paths into a ZIP archive whose bytes
//! depend only on the archived paths, their contents and the chosen
//! compression mode. Input order, directory-walk order, timestamps and file
//! modes never leak into the output.
//!
//! # Examples
//!
//! ```no_run
//! use detzip_core::Compression;
//! use detzip_core::Configuration;
//! use detzip_core::create_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Configuration::new("release")
//!     .with_source_files(vec!["src".into(), "Cargo.toml".into()])
//!     .with_exclude(vec!["*.tmp".to_string()])
//!     .with_compression(Compression::Deflate);
//!
//! let report = create_archive(&mut config)?;
//! assert_eq!(config.archive, std::path::Path::new("release.zip"));
//! println!("Archived {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod creation;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod progress;

// Re-export main API types
pub use api::ArchiveCreator;
pub use api::create_archive;
pub use api::create_archive_with_progress;
pub use config::Compression;
pub use config::Configuration;
pub use creation::CreationReport;
pub use error::DetzipError;
pub use error::Result;
pub use filter::ExcludeFilter;
pub use filter::SourceFilter;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
