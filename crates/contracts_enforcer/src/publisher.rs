//! Report assembly.
//!
//! Pure transformation from evaluation parts to a sealed
//! [`CompatibilityReport`]. No I/O happens here; handing the report to a sink
//! is the caller's concern.

use crate::{Classification, GateOutcome, distinct_categories};
use chrono::{DateTime, Utc};
use contracts_core::{
    CompatibilityMode, CompatibilityReport, ComparisonResult, DriftFinding, EnforcementError,
    ExecutionProfile, FailureDetail, ReportFields,
};

/// Everything computed during one evaluation.
#[derive(Debug, Clone)]
pub struct ReportParts<'a> {
    pub contract_name: Option<&'a str>,
    pub expected_version: Option<&'a str>,
    pub contract_version: Option<&'a str>,
    pub comparison: ComparisonResult,
    pub patch_changed: bool,
    pub compatibility_mode: Option<CompatibilityMode>,
    pub execution_profile: ExecutionProfile,
    pub classification: Classification,
    pub findings: Vec<DriftFinding>,
    pub gate: GateOutcome,
    pub failure: Option<&'a EnforcementError>,
}

/// Assembles compatibility reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPublisher;

impl ReportPublisher {
    /// Creates a new report publisher.
    pub fn new() -> Self {
        Self
    }

    /// Assembles a report stamped with the current UTC time.
    pub fn assemble(&self, parts: ReportParts<'_>) -> CompatibilityReport {
        self.assemble_at(parts, Utc::now())
    }

    /// Assembles a report stamped with `timestamp`.
    pub fn assemble_at(
        &self,
        parts: ReportParts<'_>,
        timestamp: DateTime<Utc>,
    ) -> CompatibilityReport {
        CompatibilityReport::new(ReportFields {
            contract_name: parts.contract_name.map(str::to_string),
            expected_version: parts.expected_version.map(str::to_string),
            contract_version: parts.contract_version.map(str::to_string),
            comparison_result: parts.comparison,
            compatibility_mode: parts.compatibility_mode,
            execution_profile: parts.execution_profile,
            decision: parts.classification.decision,
            impact_tier: parts.classification.impact_tier,
            drift_category: distinct_categories(&parts.findings),
            findings: parts.findings,
            patch_changed: parts.patch_changed,
            requires_review: parts.gate.requires_review,
            blocks_deployment: parts.gate.blocks_deployment,
            gate_status: parts.gate.status,
            action_required: parts.gate.action_required.to_string(),
            failure: parts.failure.map(FailureDetail::from),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gate;
    use chrono::TimeZone;
    use contracts_core::{
        Decision, DriftCategory, FailureKind, FieldSpec, GateStatus, ImpactTier, Severity,
    };
    use pretty_assertions::assert_eq;

    fn parts<'a>(findings: Vec<DriftFinding>) -> ReportParts<'a> {
        ReportParts {
            contract_name: Some("orders"),
            expected_version: Some("1.0.0"),
            contract_version: Some("1.1.0"),
            comparison: ComparisonResult::MinorUpgrade,
            patch_changed: false,
            compatibility_mode: Some(CompatibilityMode::BackwardCompatible),
            execution_profile: ExecutionProfile::Batch,
            classification: Classification {
                decision: Decision::SoftPassDrift,
                impact_tier: ImpactTier::Low,
            },
            findings,
            gate: Gate::new().evaluate(Decision::SoftPassDrift, ExecutionProfile::Batch),
            failure: None,
        }
    }

    #[test]
    fn test_drift_category_is_distinct() {
        let findings = vec![
            DriftFinding::added("a", &FieldSpec::new("int", false)),
            DriftFinding::added("b", &FieldSpec::new("int", false)),
        ];
        let report = ReportPublisher::new().assemble(parts(findings));

        assert_eq!(report.drift_category(), &[DriftCategory::FieldAdded]);
        assert_eq!(report.findings().len(), 2);
        assert_eq!(report.severity(), Severity::Warning);
        assert_eq!(report.contract_name(), Some("orders"));
        assert_eq!(report.gate_status(), GateStatus::AutoApprove);
        assert_eq!(report.action_required(), "Compatible drift, auto approved");
    }

    #[test]
    fn test_assemble_at_uses_given_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let report = ReportPublisher::new().assemble_at(parts(Vec::new()), at);
        assert_eq!(report.timestamp(), at);
        assert!(report.drift_category().is_empty());
    }

    #[test]
    fn test_failure_is_carried() {
        let error = EnforcementError::policy_load("policy.json: not found");
        let mut p = parts(Vec::new());
        p.failure = Some(&error);

        let report = ReportPublisher::new().assemble(p);
        let failure = report.failure().expect("failure detail");
        assert_eq!(failure.kind, FailureKind::PolicyLoadError);
        assert!(failure.message.contains("not found"));
    }
}
