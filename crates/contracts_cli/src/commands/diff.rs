use anyhow::{Context, Result};
use contracts_enforcer::DriftDetector;
use contracts_parser::parse_contract_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(baseline_path: &str, contract_path: &str, format: &str) -> Result<()> {
    info!("Diffing {} against baseline {}", contract_path, baseline_path);

    let baseline = parse_contract_file(Path::new(baseline_path))
        .with_context(|| format!("Failed to parse baseline contract: {}", baseline_path))?;
    let contract = parse_contract_file(Path::new(contract_path))
        .with_context(|| format!("Failed to parse contract file: {}", contract_path))?;

    let findings = DriftDetector::new().detect(&baseline.schema, &contract.schema);

    if format != "json" {
        output::print_info(&format!(
            "Baseline v{} → contract v{}",
            baseline.version, contract.version
        ));
    }
    output::print_findings(&findings, format);

    Ok(())
}
