//! Pattern-based exclusion of source paths.

use super::SourceFilter;
use crate::Configuration;
use crate::DetzipError;
use crate::Result;
use glob::MatchOptions;
use glob::Pattern;
use std::path::Path;

/// Match options for exclusion patterns.
///
/// Patterns are anchored to the whole path string and `*` may cross `/`, so
/// `.git/*` drops `.git/refs/heads/main` as well as `.git/HEAD`. Matching is
/// case-sensitive.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Drops every source path that matches one of the configured exclusion
/// patterns.
///
/// # Examples
///
/// ```
/// use detzip_core::Configuration;
/// use detzip_core::ExcludeFilter;
/// use detzip_core::SourceFilter;
/// use std::path::PathBuf;
///
/// let config = Configuration::new("out")
///     .with_source_files(vec![".git/HEAD".into(), "src/lib.rs".into()])
///     .with_exclude(vec![".git/*".to_string()]);
///
/// assert!(ExcludeFilter.is_enabled(&config));
/// let narrowed = ExcludeFilter.apply(&config).unwrap();
/// assert_eq!(narrowed.source_files, vec![PathBuf::from("src/lib.rs")]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeFilter;

impl SourceFilter for ExcludeFilter {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn is_enabled(&self, config: &Configuration) -> bool {
        !config.exclude.is_empty()
    }

    fn apply(&self, config: &Configuration) -> Result<Configuration> {
        // Compile everything up front so a bad pattern fails before any path
        // is dropped.
        let patterns = compile_patterns(&config.exclude)?;

        let source_files = config
            .source_files
            .iter()
            .filter(|path| {
                let excluded = is_excluded(path, &patterns);
                if excluded {
                    tracing::debug!(path = %path.display(), "excluded by pattern");
                }
                !excluded
            })
            .cloned()
            .collect();

        Ok(Configuration {
            source_files,
            ..config.clone()
        })
    }
}

/// Compiles exclusion patterns, failing on the first malformed one.
///
/// # Errors
///
/// Returns [`DetzipError::InvalidPattern`] naming the offending pattern.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|raw| {
            Pattern::new(raw).map_err(|source| DetzipError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })
        })
        .collect()
}

/// Returns `true` if `path` matches any of `patterns`.
///
/// Paths that are not valid UTF-8 never match.
#[must_use]
pub fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_path_with(path, MATCH_OPTIONS))
}
