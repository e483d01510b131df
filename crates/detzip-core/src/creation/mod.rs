//! Deterministic archive creation.
//!
//! The pipeline runs in four steps:
//!
//! 1. [`walker`] expands sources into regular files.
//! 2. [`plan`] deduplicates them and sorts them canonically.
//! 3. [`zip`] serializes them with normalized metadata.
//! 4. [`builder`] publishes the result atomically under its final name.

pub mod builder;
pub mod plan;
pub mod report;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use builder::build;
pub use plan::ArchiveEntry;
pub use plan::EntryPlan;
pub use report::CreationReport;
pub use walker::CandidateEntry;
pub use walker::EntryKind;
