use colored::*;
use contracts_core::{CompatibilityReport, Decision, DriftFinding, FindingValue};
use serde_json::json;

pub fn print_compatibility_report(report: &CompatibilityReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &CompatibilityReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  COMPATIBILITY REPORT".bold());
    println!("{}", "═".repeat(60));

    let decision = report.decision().as_str();
    match report.decision() {
        Decision::Pass => println!("\n{} {}", "✓".green().bold(), decision.green().bold()),
        Decision::SoftPassDrift => {
            println!("\n{} {}", "!".yellow().bold(), decision.yellow().bold())
        }
        Decision::FieldBreakingChange | Decision::HardFail => {
            println!("\n{} {}", "✗".red().bold(), decision.red().bold())
        }
    }

    println!("\n{}", "Versions:".bold());
    println!("  Expected:    {}", report.expected_version().unwrap_or("N/A"));
    println!("  Contract:    {}", report.contract_version().unwrap_or("N/A"));
    println!("  Comparison:  {}", report.comparison_result());
    if report.patch_changed() {
        println!("  Patch:       {}", "changed (informational)".dimmed());
    }

    println!("\n{}", "Policy:".bold());
    println!(
        "  Mode:        {}",
        report
            .compatibility_mode()
            .map(|m| m.as_str())
            .unwrap_or("N/A")
    );
    println!("  Profile:     {}", report.execution_profile());

    println!("\n{}", "Impact:".bold());
    println!("  Tier:        {}", report.impact_tier());
    println!("  Severity:    {}", report.severity());
    if !report.drift_category().is_empty() {
        let categories: Vec<&str> = report.drift_category().iter().map(|c| c.as_str()).collect();
        println!("  Drift:       {}", categories.join(", "));
    }

    if !report.findings().is_empty() {
        println!("\n{}", "Findings:".yellow().bold());
        for (i, finding) in report.findings().iter().enumerate() {
            println!("  {}. {}", i + 1, describe_finding(finding));
        }
    }

    if let Some(failure) = report.failure() {
        println!("\n{}", "Failure:".red().bold());
        println!("  {}", failure.message.red());
    }

    println!("\n{}", "Gate:".bold());
    println!("  Status:            {}", report.gate_status());
    println!("  Action required:   {}", report.action_required());
    println!("  Requires review:   {}", report.requires_review());
    if report.blocks_deployment() {
        println!("  Blocks deployment: {}", "true".red().bold());
    } else {
        println!("  Blocks deployment: false");
    }
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &CompatibilityReport) {
    match report.to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize report: {}", e)),
    }
}

pub fn print_findings(findings: &[DriftFinding], format: &str) {
    match format {
        "json" => {
            let output = json!({
                "finding_count": findings.len(),
                "findings": findings,
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => print_error(&format!("Failed to serialize findings: {}", e)),
            }
        }
        _ => {
            if findings.is_empty() {
                print_success("No drift detected");
                return;
            }
            println!("\n{}", "Findings:".yellow().bold());
            for (i, finding) in findings.iter().enumerate() {
                println!("  {}. {}", i + 1, describe_finding(finding));
            }
            println!("\n  Total findings: {}", findings.len());
        }
    }
}

fn describe_finding(finding: &DriftFinding) -> String {
    format!(
        "{} {} ({} → {})",
        finding.category.as_str().bold(),
        finding.field_name,
        describe_value(finding.previous.as_ref()),
        describe_value(finding.current.as_ref())
    )
}

fn describe_value(value: Option<&FindingValue>) -> String {
    match value {
        None => "absent".to_string(),
        Some(FindingValue::Field(spec)) => format!(
            "{}{}",
            spec.field_type,
            if spec.required { ", required" } else { "" }
        ),
        Some(FindingValue::Type(t)) => t.clone(),
        Some(FindingValue::Required(true)) => "required".to_string(),
        Some(FindingValue::Required(false)) => "optional".to_string(),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
