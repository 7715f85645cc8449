//! The compatibility report artifact.
//!
//! The report's field set is itself a contract with downstream BI consumers:
//! fields are only ever added, never removed or repurposed. Bump
//! [`REPORT_VERSION`] when adding one.

use crate::{
    CompatibilityMode, ComparisonResult, Decision, DriftCategory, DriftFinding,
    EnforcementError, ExecutionProfile, FailureKind, GateStatus, ImpactTier, Severity,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema revision of [`CompatibilityReport`].
pub const REPORT_VERSION: u32 = 2;

/// Why an evaluation could not be completed normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable explanation
    pub message: String,
}

impl From<&EnforcementError> for FailureDetail {
    fn from(error: &EnforcementError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Everything that goes into a report, before it is sealed.
#[derive(Debug, Clone)]
pub struct ReportFields {
    pub contract_name: Option<String>,
    pub expected_version: Option<String>,
    pub contract_version: Option<String>,
    pub comparison_result: ComparisonResult,
    pub compatibility_mode: Option<CompatibilityMode>,
    pub execution_profile: ExecutionProfile,
    pub decision: Decision,
    pub impact_tier: ImpactTier,
    pub drift_category: Vec<DriftCategory>,
    pub findings: Vec<DriftFinding>,
    pub patch_changed: bool,
    pub requires_review: bool,
    pub blocks_deployment: bool,
    pub gate_status: GateStatus,
    pub action_required: String,
    pub failure: Option<FailureDetail>,
    pub timestamp: DateTime<Utc>,
}

/// Fixed-shape summary of one enforcement evaluation.
///
/// Immutable once built: fields are private and only exposed through getters.
/// Version and mode fields are `null` only when the input they come from could
/// not be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    expected_version: Option<String>,
    contract_version: Option<String>,
    comparison_result: ComparisonResult,
    compatibility_mode: Option<CompatibilityMode>,
    decision: Decision,
    severity: Severity,
    impact_tier: ImpactTier,
    drift_category: Vec<DriftCategory>,
    requires_review: bool,
    blocks_deployment: bool,
    timestamp: DateTime<Utc>,

    // Added in report version 1
    report_version: u32,
    contract_name: Option<String>,
    execution_profile: ExecutionProfile,
    patch_changed: bool,
    findings: Vec<DriftFinding>,
    failure: Option<FailureDetail>,

    // Added in report version 2
    gate_status: GateStatus,
    action_required: String,
}

impl CompatibilityReport {
    /// Seals a report. Severity is derived from the impact tier.
    pub fn new(fields: ReportFields) -> Self {
        Self {
            expected_version: fields.expected_version,
            contract_version: fields.contract_version,
            comparison_result: fields.comparison_result,
            compatibility_mode: fields.compatibility_mode,
            decision: fields.decision,
            severity: fields.impact_tier.severity(),
            impact_tier: fields.impact_tier,
            drift_category: fields.drift_category,
            requires_review: fields.requires_review,
            blocks_deployment: fields.blocks_deployment,
            timestamp: fields.timestamp,
            report_version: REPORT_VERSION,
            contract_name: fields.contract_name,
            execution_profile: fields.execution_profile,
            patch_changed: fields.patch_changed,
            findings: fields.findings,
            failure: fields.failure,
            gate_status: fields.gate_status,
            action_required: fields.action_required,
        }
    }

    pub fn expected_version(&self) -> Option<&str> {
        self.expected_version.as_deref()
    }

    pub fn contract_version(&self) -> Option<&str> {
        self.contract_version.as_deref()
    }

    pub fn comparison_result(&self) -> ComparisonResult {
        self.comparison_result
    }

    pub fn compatibility_mode(&self) -> Option<CompatibilityMode> {
        self.compatibility_mode
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn impact_tier(&self) -> ImpactTier {
        self.impact_tier
    }

    /// Distinct drift categories present, in category order.
    pub fn drift_category(&self) -> &[DriftCategory] {
        &self.drift_category
    }

    pub fn requires_review(&self) -> bool {
        self.requires_review
    }

    pub fn blocks_deployment(&self) -> bool {
        self.blocks_deployment
    }

    /// UTC instant the report was assembled.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn report_version(&self) -> u32 {
        self.report_version
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn execution_profile(&self) -> ExecutionProfile {
        self.execution_profile
    }

    /// Whether the patch components differed (informational only).
    pub fn patch_changed(&self) -> bool {
        self.patch_changed
    }

    /// Every finding, in deterministic order.
    pub fn findings(&self) -> &[DriftFinding] {
        &self.findings
    }

    pub fn failure(&self) -> Option<&FailureDetail> {
        self.failure.as_ref()
    }

    /// Gate verdict for CI/CD consumers.
    pub fn gate_status(&self) -> GateStatus {
        self.gate_status
    }

    /// One-line instruction for whoever reads the gate result.
    pub fn action_required(&self) -> &str {
        &self.action_required
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
