//! Source filters applied before the archive is built.
//!
//! A filter narrows the configuration's source list. Filters never mutate the
//! caller's configuration: each one returns a new, narrowed copy, so a failing
//! filter leaves nothing half-applied.

pub mod exclude;

pub use exclude::ExcludeFilter;

use crate::Configuration;
use crate::Result;

/// A step that narrows the source list of a [`Configuration`].
pub trait SourceFilter {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Returns `true` if the filter has anything to do for `config`.
    fn is_enabled(&self, config: &Configuration) -> bool;

    /// Returns a copy of `config` with the source list narrowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter's own settings are invalid.
    fn apply(&self, config: &Configuration) -> Result<Configuration>;
}

/// Returns the built-in filters, in the order they run.
#[must_use]
pub fn default_filters() -> Vec<Box<dyn SourceFilter>> {
    vec![Box::new(ExcludeFilter)]
}

/// Runs every enabled filter in order and returns the narrowed
/// configuration.
///
/// # Examples
///
/// ```
/// use detzip_core::Configuration;
/// use detzip_core::filter::apply_filters;
/// use detzip_core::filter::default_filters;
///
/// let config = Configuration::new("out")
///     .with_source_files(vec!["main.rs".into(), "debug.log".into()])
///     .with_exclude(vec!["*.log".to_string()]);
///
/// let narrowed = apply_filters(&config, &default_filters()).unwrap();
/// assert_eq!(narrowed.source_files, vec![std::path::PathBuf::from("main.rs")]);
/// ```
///
/// # Errors
///
/// Returns the first error produced by a filter.
pub fn apply_filters(
    config: &Configuration,
    filters: &[Box<dyn SourceFilter>],
) -> Result<Configuration> {
    let mut current = config.clone();
    for filter in filters {
        if !filter.is_enabled(&current) {
            tracing::debug!(filter = filter.name(), "filter disabled, skipping");
            continue;
        }
        let before = current.source_files.len();
        current = filter.apply(&current)?;
        tracing::debug!(
            filter = filter.name(),
            before,
            after = current.source_files.len(),
            "filter applied"
        );
    }
    Ok(current)
}
