//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use detzip_core::CreationReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn summary_lines(&self, report: &CreationReport) -> Vec<String> {
        let mut lines = vec![
            format!(
                "  Files added:      {}",
                Self::format_number(report.files_added)
            ),
            format!("  Total size:       {}", humanize_bytes(report.bytes_written)),
            format!(
                "  Archive size:     {}",
                humanize_bytes(report.bytes_compressed)
            ),
        ];

        if report.compression_percentage() > 0.0 {
            lines.push(format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.files_skipped > 0 {
            lines.push(format!("  Files skipped:    {}", report.files_skipped));
        }

        if self.verbose {
            lines.push(format!(
                "  Duplicates:       {}",
                Self::format_number(report.duplicates_collapsed)
            ));
            lines.push(format!("  Duration:         {:?}", report.duration));
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, archive: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.term.write_line(&format!(
                "{} Archive created: {}",
                style("✓").green().bold(),
                archive.display()
            ))?;
        } else {
            self.term
                .write_line(&format!("Archive created: {}", archive.display()))?;
        }

        self.term.write_line("")?;
        for line in self.summary_lines(report) {
            self.term.write_line(&line)?;
        }

        if report.has_warnings() {
            self.term.write_line("")?;
            if self.use_colors {
                self.term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()))?;
            } else {
                self.term.write_line("Warnings:")?;
            }
            for warning in &report.warnings {
                self.term.write_line(&format!("  - {warning}"))?;
            }
        }

        Ok(())
    }
}
