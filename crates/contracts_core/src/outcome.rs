//! Intermediate and final outcomes of an enforcement run.
//!
//! These are closed sum types so every match over them is checked for
//! exhaustiveness. Each serializes to a stable upper-case wire name that
//! downstream consumers key on.

use crate::FieldSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse relationship between a contract version and the expected version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonResult {
    /// Same major and minor
    ExactMatch,
    /// Same major, higher minor
    MinorUpgrade,
    /// Higher major
    MajorUpgrade,
    /// Lower major, or same major with lower minor
    Downgrade,
    /// At least one version string could not be parsed
    Incomparable,
}

impl ComparisonResult {
    /// All results, in declaration order.
    pub const ALL: [ComparisonResult; 5] = [
        ComparisonResult::ExactMatch,
        ComparisonResult::MinorUpgrade,
        ComparisonResult::MajorUpgrade,
        ComparisonResult::Downgrade,
        ComparisonResult::Incomparable,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonResult::ExactMatch => "EXACT_MATCH",
            ComparisonResult::MinorUpgrade => "MINOR_UPGRADE",
            ComparisonResult::MajorUpgrade => "MAJOR_UPGRADE",
            ComparisonResult::Downgrade => "DOWNGRADE",
            ComparisonResult::Incomparable => "INCOMPARABLE",
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of structural difference between two schemas.
///
/// Declaration order is the order findings are grouped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftCategory {
    FieldAdded,
    FieldRemoved,
    TypeChanged,
    RequiredChanged,
}

impl DriftCategory {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftCategory::FieldAdded => "FIELD_ADDED",
            DriftCategory::FieldRemoved => "FIELD_REMOVED",
            DriftCategory::TypeChanged => "TYPE_CHANGED",
            DriftCategory::RequiredChanged => "REQUIRED_CHANGED",
        }
    }
}

impl fmt::Display for DriftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Before/after value attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingValue {
    /// Whole field definition, for additions and removals
    Field(FieldSpec),
    /// Declared type, for type changes
    Type(String),
    /// Requiredness, for required-flag changes
    Required(bool),
}

/// A single structural difference on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftFinding {
    /// What changed
    pub category: DriftCategory,

    /// Field the change applies to
    pub field_name: String,

    /// Value in the expected schema, absent for additions
    pub previous: Option<FindingValue>,

    /// Value in the actual schema, absent for removals
    pub current: Option<FindingValue>,
}

impl DriftFinding {
    pub fn added(field_name: impl Into<String>, spec: &FieldSpec) -> Self {
        Self {
            category: DriftCategory::FieldAdded,
            field_name: field_name.into(),
            previous: None,
            current: Some(FindingValue::Field(spec.clone())),
        }
    }

    pub fn removed(field_name: impl Into<String>, spec: &FieldSpec) -> Self {
        Self {
            category: DriftCategory::FieldRemoved,
            field_name: field_name.into(),
            previous: Some(FindingValue::Field(spec.clone())),
            current: None,
        }
    }

    pub fn type_changed(
        field_name: impl Into<String>,
        previous: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            category: DriftCategory::TypeChanged,
            field_name: field_name.into(),
            previous: Some(FindingValue::Type(previous.into())),
            current: Some(FindingValue::Type(current.into())),
        }
    }

    pub fn required_changed(field_name: impl Into<String>, previous: bool, current: bool) -> Self {
        Self {
            category: DriftCategory::RequiredChanged,
            field_name: field_name.into(),
            previous: Some(FindingValue::Required(previous)),
            current: Some(FindingValue::Required(current)),
        }
    }

    /// Whether consumers built against the expected schema can break on this change.
    ///
    /// Removals and type changes always break. A required-flag change breaks
    /// only when the field became required.
    pub fn is_breaking(&self) -> bool {
        match self.category {
            DriftCategory::FieldAdded => false,
            DriftCategory::FieldRemoved | DriftCategory::TypeChanged => true,
            DriftCategory::RequiredChanged => {
                matches!(self.current, Some(FindingValue::Required(true)))
            }
        }
    }
}

/// Enforcement verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Pass,
    SoftPassDrift,
    FieldBreakingChange,
    HardFail,
}

impl Decision {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Pass => "PASS",
            Decision::SoftPassDrift => "SOFT_PASS_DRIFT",
            Decision::FieldBreakingChange => "FIELD_BREAKING_CHANGE",
            Decision::HardFail => "HARD_FAIL",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment gate verdict published for CI/CD consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    /// Deployment halted
    Block,
    /// Continues, but a human must look at the run
    ReviewRequired,
    /// Continues with compatible drift, review recommended
    Warning,
    /// Continues with compatible drift, logged only
    AutoApprove,
    /// Nothing changed that matters
    NoAction,
}

impl GateStatus {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Block => "BLOCK",
            GateStatus::ReviewRequired => "REVIEW_REQUIRED",
            GateStatus::Warning => "WARNING",
            GateStatus::AutoApprove => "AUTO_APPROVE",
            GateStatus::NoAction => "NO_ACTION",
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity ranking of a decision, totally ordered from `None` to `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactTier {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactTier {
    /// Next tier up, saturating at `Critical`.
    pub fn escalate(self) -> Self {
        match self {
            ImpactTier::None => ImpactTier::Low,
            ImpactTier::Low => ImpactTier::Medium,
            ImpactTier::Medium => ImpactTier::High,
            ImpactTier::High | ImpactTier::Critical => ImpactTier::Critical,
        }
    }

    /// Report severity label derived from the tier.
    pub fn severity(self) -> Severity {
        match self {
            ImpactTier::None => Severity::Info,
            ImpactTier::Low => Severity::Warning,
            ImpactTier::Medium | ImpactTier::High => Severity::Error,
            ImpactTier::Critical => Severity::Critical,
        }
    }

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactTier::None => "NONE",
            ImpactTier::Low => "LOW",
            ImpactTier::Medium => "MEDIUM",
            ImpactTier::High => "HIGH",
            ImpactTier::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-facing severity label carried in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
