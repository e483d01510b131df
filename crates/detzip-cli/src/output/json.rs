//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use detzip_core::CreationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct CreationOutput {
    archive: String,
    files_added: usize,
    duplicates_collapsed: usize,
    files_skipped: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl CreationOutput {
    fn new(archive: &Path, report: &CreationReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            files_added: report.files_added,
            duplicates_collapsed: report.duplicates_collapsed,
            files_skipped: report.files_skipped,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, archive: &Path, report: &CreationReport) -> Result<()> {
        let output = JsonOutput::success("create", CreationOutput::new(archive, report));
        Self::output(&output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_output_structure() {
        let mut report = CreationReport::new("dist/app.zip");
        report.files_added = 2;
        report.duplicates_collapsed = 1;
        report.bytes_written = 2048;
        report.bytes_compressed = 512;
        report.add_warning("Skipped previous archive: dist/app.zip");

        let output = JsonOutput::success(
            "create",
            CreationOutput::new(Path::new("dist/app.zip"), &report),
        );
        let value: serde_json::Value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["archive"], "dist/app.zip");
        assert_eq!(value["data"]["files_added"], 2);
        assert_eq!(value["data"]["duplicates_collapsed"], 1);
        assert_eq!(value["data"]["compression_percentage"], 75.0);
        assert_eq!(value["data"]["warnings"].as_array().unwrap().len(), 1);
    }
}
