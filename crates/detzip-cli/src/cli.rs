//! CLI argument parsing using clap.

use clap::Parser;
use clap::ValueEnum;
use detzip_core::Compression;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "detzip")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Entries are sorted and their timestamps and permissions reset, so the same \
                  inputs always produce a byte-identical archive."
)]
pub struct Cli {
    /// Archive to create (".zip" is appended if missing)
    #[arg(value_name = "ZIPFILE")]
    pub zipfile: PathBuf,

    /// Source files or directories to archive
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Exclude pattern (glob, can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Expand directories before applying exclude patterns
    #[arg(short = 'r', long = "recurse-paths")]
    pub recurse_paths: bool,

    /// Compression method
    #[arg(
        short = 'Z',
        long = "compression-method",
        value_name = "METHOD",
        value_enum,
        default_value_t = CompressionMethod::Deflate
    )]
    pub compression_method: CompressionMethod,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompressionMethod {
    /// Store entries uncompressed
    Store,
    /// Compress entries with deflate
    Deflate,
}

impl From<CompressionMethod> for Compression {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Store => Self::Store,
            CompressionMethod::Deflate => Self::Deflate,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["detzip", "out", "src"]).unwrap();
        assert_eq!(cli.zipfile, PathBuf::from("out"));
        assert_eq!(cli.sources, vec![PathBuf::from("src")]);
        assert!(cli.exclude.is_empty());
        assert!(!cli.recurse_paths);
        assert_eq!(cli.compression_method, CompressionMethod::Deflate);
    }

    #[test]
    fn test_repeated_excludes_and_short_flags() {
        let cli = Cli::try_parse_from([
            "detzip", "-r", "-Z", "store", "-x", "*.log", "-x", ".git/*", "out.zip", "a", "b",
        ])
        .unwrap();
        assert_eq!(cli.exclude, vec!["*.log".to_string(), ".git/*".to_string()]);
        assert!(cli.recurse_paths);
        assert_eq!(Compression::from(cli.compression_method), Compression::Store);
        assert_eq!(cli.sources.len(), 2);
    }

    #[test]
    fn test_sources_required() {
        assert!(Cli::try_parse_from(["detzip", "out.zip"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["detzip", "-q", "-v", "out", "src"]).is_err());
    }

    #[test]
    fn test_unknown_compression_method_rejected() {
        assert!(Cli::try_parse_from(["detzip", "-Z", "bzip2", "out", "src"]).is_err());
    }
}
