use anyhow::{Context, Result};
use contracts_core::VersionRole;
use contracts_enforcer::Version;
use contracts_parser::parse_contract_file;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(contract_path: &str, format: &str) -> Result<()> {
    info!("Checking contract: {}", contract_path);

    // Parse the contract file
    let path = Path::new(contract_path);
    let contract = parse_contract_file(path)
        .with_context(|| format!("Failed to parse contract file: {}", contract_path))?;

    let version = Version::parse(VersionRole::Contract, &contract.version)
        .with_context(|| format!("Contract {} has an unusable version", contract_path))?;

    let required = contract.schema.values().filter(|f| f.required).count();

    if format == "json" {
        let output = json!({
            "name": contract.name,
            "version": version.to_string(),
            "field_count": contract.schema.len(),
            "required_count": required,
            "schema": contract.schema,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::print_info(&format!(
        "Contract loaded: {} v{}",
        if contract.name.is_empty() {
            "(unnamed)"
        } else {
            contract.name.as_str()
        },
        version
    ));
    output::print_success("Contract is well-formed");

    println!("\nContract Summary:");
    println!(
        "  Name:        {}",
        if contract.name.is_empty() {
            "N/A"
        } else {
            contract.name.as_str()
        }
    );
    println!("  Version:     {}", version);
    println!("  Fields:      {}", contract.schema.len());
    println!("  Required:    {}", required);

    if !contract.schema.is_empty() {
        println!("\nSchema:");
        for (name, spec) in &contract.schema {
            println!(
                "  {:<24} {:<12} {}",
                name,
                spec.field_type,
                if spec.required { "required" } else { "optional" }
            );
        }
    }

    Ok(())
}
