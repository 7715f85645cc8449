//! Decision and impact classification.
//!
//! A total decision table over the version comparison, the drift findings and
//! the compatibility mode. Rows, in priority order:
//!
//! 1. `INCOMPARABLE` → `HARD_FAIL` / `CRITICAL`
//! 2. any breaking finding → `FIELD_BREAKING_CHANGE`, `MEDIUM` plus one tier per
//!    additional distinct breaking category, capped at `CRITICAL`
//! 3. `STRICT` with a non-breaking finding or an upgrade →
//!    `FIELD_BREAKING_CHANGE` / `LOW`
//! 4. `MAJOR_UPGRADE` outside `STRICT` → `SOFT_PASS_DRIFT` / `MEDIUM`
//! 5. non-breaking findings only, outside `STRICT` → `SOFT_PASS_DRIFT` / `LOW`
//! 6. no findings with `EXACT_MATCH`, or with `MINOR_UPGRADE` outside
//!    `STRICT` → `PASS` / `NONE`
//! 7. `DOWNGRADE` with no findings → `HARD_FAIL` / `HIGH` under `STRICT` and
//!    `BACKWARD_COMPATIBLE`, `SOFT_PASS_DRIFT` / `MEDIUM` under `PERMISSIVE`
//!
//! The table is a single exhaustive `match` with no catch-all arm.

use contracts_core::{
    CompatibilityMode, ComparisonResult, Decision, DriftCategory, DriftFinding, ImpactTier,
};
use std::collections::BTreeSet;

/// Decision and impact tier for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub decision: Decision,
    pub impact_tier: ImpactTier,
}

impl Classification {
    fn new(decision: Decision, impact_tier: ImpactTier) -> Self {
        Self {
            decision,
            impact_tier,
        }
    }
}

/// Combines comparator and detector output with the active mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactClassifier;

impl ImpactClassifier {
    /// Creates a new impact classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classifies an evaluation.
    pub fn classify(
        &self,
        comparison: ComparisonResult,
        findings: &[DriftFinding],
        mode: CompatibilityMode,
    ) -> Classification {
        let breaking: BTreeSet<DriftCategory> = findings
            .iter()
            .filter(|f| f.is_breaking())
            .map(|f| f.category)
            .collect();
        let has_non_breaking = findings.iter().any(|f| !f.is_breaking());

        self.decide(comparison, breaking.len(), has_non_breaking, mode)
    }

    /// Looks up the table directly.
    ///
    /// `breaking_categories` is the number of distinct breaking categories
    /// present; `has_non_breaking` is whether any non-breaking finding exists.
    pub fn decide(
        &self,
        comparison: ComparisonResult,
        breaking_categories: usize,
        has_non_breaking: bool,
        mode: CompatibilityMode,
    ) -> Classification {
        use CompatibilityMode::{BackwardCompatible, Permissive, Strict};
        use ComparisonResult::{Downgrade, ExactMatch, Incomparable, MajorUpgrade, MinorUpgrade};
        use Decision::{FieldBreakingChange, HardFail, Pass, SoftPassDrift};

        let breaking_tier = breaking_tier(breaking_categories);

        match (comparison, breaking_tier, has_non_breaking, mode) {
            (Incomparable, _, _, _) => Classification::new(HardFail, ImpactTier::Critical),

            (_, Some(tier), _, _) => Classification::new(FieldBreakingChange, tier),

            (MinorUpgrade | MajorUpgrade, None, _, Strict)
            | (ExactMatch | Downgrade, None, true, Strict) => {
                Classification::new(FieldBreakingChange, ImpactTier::Low)
            }

            (MajorUpgrade, None, _, BackwardCompatible | Permissive) => {
                Classification::new(SoftPassDrift, ImpactTier::Medium)
            }

            (
                ExactMatch | MinorUpgrade | Downgrade,
                None,
                true,
                BackwardCompatible | Permissive,
            ) => Classification::new(SoftPassDrift, ImpactTier::Low),

            (ExactMatch, None, false, _)
            | (MinorUpgrade, None, false, BackwardCompatible | Permissive) => {
                Classification::new(Pass, ImpactTier::None)
            }

            (Downgrade, None, false, Strict | BackwardCompatible) => {
                Classification::new(HardFail, ImpactTier::High)
            }
            (Downgrade, None, false, Permissive) => {
                Classification::new(SoftPassDrift, ImpactTier::Medium)
            }
        }
    }
}

/// `MEDIUM` for one breaking category, one tier higher for each further one.
fn breaking_tier(categories: usize) -> Option<ImpactTier> {
    if categories == 0 {
        return None;
    }
    let tier = (1..categories).fold(ImpactTier::Medium, |tier, _| tier.escalate());
    Some(tier)
}
