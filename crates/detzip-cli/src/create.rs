//! Archive creation command.

use crate::cli::Cli;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use detzip_core::Configuration;
use detzip_core::NoopProgress;
use detzip_core::create_archive_with_progress;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut config = Configuration::new(&cli.zipfile)
        .with_source_files(cli.sources.clone())
        .with_exclude(cli.exclude.clone())
        .with_compression(cli.compression_method.into());

    if cli.recurse_paths {
        config = add_archive_context(config.with_expanded_sources(), &cli.zipfile)?;
    }

    tracing::debug!(
        sources = config.source_files.len(),
        patterns = config.exclude.len(),
        compression = %config.compression,
        "starting build"
    );

    // Progress bar only on an interactive terminal, never in quiet or JSON mode
    let report = if !cli.quiet && !cli.json && CliProgress::should_show() {
        let mut progress = CliProgress::new("Creating");
        add_archive_context(
            create_archive_with_progress(&mut config, &mut progress),
            &cli.zipfile,
        )?
    } else {
        add_archive_context(
            create_archive_with_progress(&mut config, &mut NoopProgress),
            &cli.zipfile,
        )?
    };

    formatter.format_creation_result(&config.archive, &report)?;

    Ok(())
}
