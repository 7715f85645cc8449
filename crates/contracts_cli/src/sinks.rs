//! Concrete report sinks.

use contracts_core::{CompatibilityReport, MetadataPublisher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::output;

/// Writes each report as pretty JSON to
/// `<dir>/compatibility_report_<YYYYmmdd_HHMMSS>.json`, creating `dir` if needed.
#[derive(Debug, Clone)]
pub struct JsonFilePublisher {
    dir: PathBuf,
}

impl JsonFilePublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the report will be written to.
    pub fn report_path(&self, report: &CompatibilityReport) -> PathBuf {
        let stamp = report.timestamp().format("%Y%m%d_%H%M%S");
        self.dir.join(format!("compatibility_report_{stamp}.json"))
    }

    fn write(&self, path: &Path, report: &CompatibilityReport) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, report.to_json_pretty()?)?;
        Ok(())
    }
}

impl MetadataPublisher for JsonFilePublisher {
    fn publish(&self, report: &CompatibilityReport) {
        let path = self.report_path(report);
        match self.write(&path, report) {
            Ok(()) => info!("Compatibility report written: {}", path.display()),
            Err(e) => error!("Failed to write compatibility report {}: {e}", path.display()),
        }
    }
}

/// Prints each report to stdout as text or JSON.
#[derive(Debug, Clone)]
pub struct StdoutPublisher {
    format: String,
}

impl StdoutPublisher {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl MetadataPublisher for StdoutPublisher {
    fn publish(&self, report: &CompatibilityReport) {
        output::print_compatibility_report(report, &self.format);
    }
}
