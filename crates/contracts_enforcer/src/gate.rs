//! CI/CD deployment gate.
//!
//! Turns a decision and an execution profile into a block/continue outcome.
//! The gate only computes the signal; halting is the caller's job, and the
//! caller must read the outcome before doing any irreversible downstream work.

use contracts_core::{Decision, ExecutionProfile, GateStatus};
use std::fmt;
use tracing::{error, warn};

/// Process exit status of a gated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// Not blocked (exit code 0)
    Continue,
    /// Contract or policy could not be loaded (exit code 1)
    InputFailure,
    /// Deployment blocked (exit code 2)
    Blocked,
}

impl ExitStatus {
    /// Numeric process exit code.
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Continue => 0,
            ExitStatus::InputFailure => 1,
            ExitStatus::Blocked => 2,
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Continue => write!(f, "CONTINUE ({})", self.code()),
            ExitStatus::InputFailure => write!(f, "INPUT_FAILURE ({})", self.code()),
            ExitStatus::Blocked => write!(f, "BLOCKED ({})", self.code()),
        }
    }
}

/// What the gate decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    /// Batch pipelines must halt
    pub blocks_deployment: bool,
    /// A human should look at this run
    pub requires_review: bool,
    /// Verdict published to CI/CD consumers
    pub status: GateStatus,
    /// Instruction matching `status`
    pub action_required: &'static str,
}

impl GateOutcome {
    fn new(status: GateStatus, decision: Decision) -> Self {
        Self {
            blocks_deployment: status == GateStatus::Block,
            requires_review: matches!(
                status,
                GateStatus::Block | GateStatus::ReviewRequired | GateStatus::Warning
            ),
            status,
            action_required: action_required(status, decision),
        }
    }

    /// Exit status implied by the outcome alone.
    pub fn exit_status(&self) -> ExitStatus {
        if self.blocks_deployment {
            ExitStatus::Blocked
        } else {
            ExitStatus::Continue
        }
    }
}

/// Evaluates decisions against the execution profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gate;

impl Gate {
    /// Creates a new gate.
    pub fn new() -> Self {
        Self
    }

    /// Computes the gate outcome.
    ///
    /// `BATCH` blocks on `FIELD_BREAKING_CHANGE` and `HARD_FAIL`, and flags
    /// exactly the blocked runs for review. `STREAMING` never blocks; it flags
    /// every non-`PASS` run for review and continues.
    ///
    /// | Decision                | `BATCH`        | `STREAMING`       |
    /// |-------------------------|----------------|-------------------|
    /// | `PASS`                  | `NO_ACTION`    | `NO_ACTION`       |
    /// | `SOFT_PASS_DRIFT`       | `AUTO_APPROVE` | `WARNING`         |
    /// | `FIELD_BREAKING_CHANGE` | `BLOCK`        | `REVIEW_REQUIRED` |
    /// | `HARD_FAIL`             | `BLOCK`        | `REVIEW_REQUIRED` |
    pub fn evaluate(&self, decision: Decision, profile: ExecutionProfile) -> GateOutcome {
        let status = match (decision, profile) {
            (Decision::Pass, _) => GateStatus::NoAction,
            (Decision::SoftPassDrift, ExecutionProfile::Batch) => GateStatus::AutoApprove,
            (Decision::SoftPassDrift, ExecutionProfile::Streaming) => GateStatus::Warning,
            (Decision::FieldBreakingChange | Decision::HardFail, ExecutionProfile::Batch) => {
                GateStatus::Block
            }
            (Decision::FieldBreakingChange | Decision::HardFail, ExecutionProfile::Streaming) => {
                GateStatus::ReviewRequired
            }
        };
        let outcome = GateOutcome::new(status, decision);

        if outcome.blocks_deployment {
            error!("Gate blocked deployment: decision {decision} under {profile} profile");
        } else if profile == ExecutionProfile::Streaming && outcome.requires_review {
            warn!("Streaming profile: {decision} logged for review, pipeline continues");
        }

        outcome
    }
}

fn action_required(status: GateStatus, decision: Decision) -> &'static str {
    match (status, decision) {
        (GateStatus::Block, Decision::HardFail) => "Version incompatible, deployment blocked",
        (GateStatus::Block, _) => "Schema breaking change, deployment blocked",
        (GateStatus::ReviewRequired, Decision::HardFail) => {
            "Version incompatible, manual review required"
        }
        (GateStatus::ReviewRequired, _) => "Schema breaking change, manual review required",
        (GateStatus::Warning, _) => "Compatible drift, review recommended",
        (GateStatus::AutoApprove, _) => "Compatible drift, auto approved",
        (GateStatus::NoAction, _) => "No compatibility impact",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DECISIONS: [Decision; 4] = [
        Decision::Pass,
        Decision::SoftPassDrift,
        Decision::FieldBreakingChange,
        Decision::HardFail,
    ];

    #[test]
    fn test_batch_blocks_on_breaking_and_hard_fail() {
        let gate = Gate::new();
        for decision in DECISIONS {
            let outcome = gate.evaluate(decision, ExecutionProfile::Batch);
            let expected = matches!(decision, Decision::FieldBreakingChange | Decision::HardFail);
            assert_eq!(outcome.blocks_deployment, expected, "{decision}");
            assert_eq!(outcome.requires_review, expected, "{decision}");
        }
    }

    #[test]
    fn test_streaming_never_blocks() {
        let gate = Gate::new();
        for decision in DECISIONS {
            let outcome = gate.evaluate(decision, ExecutionProfile::Streaming);
            assert!(!outcome.blocks_deployment, "{decision}");
            assert_eq!(outcome.requires_review, decision != Decision::Pass, "{decision}");
            assert_eq!(outcome.exit_status(), ExitStatus::Continue);
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Continue.code(), 0);
        assert_eq!(ExitStatus::InputFailure.code(), 1);
        assert_eq!(ExitStatus::Blocked.code(), 2);

        let blocked = Gate::new().evaluate(Decision::HardFail, ExecutionProfile::Batch);
        assert_eq!(blocked.exit_status(), ExitStatus::Blocked);
    }

    #[test]
    fn test_gate_status_by_profile() {
        use ExecutionProfile::{Batch, Streaming};
        use GateStatus::*;

        let cases = [
            (Decision::Pass, Batch, NoAction),
            (Decision::Pass, Streaming, NoAction),
            (Decision::SoftPassDrift, Batch, AutoApprove),
            (Decision::SoftPassDrift, Streaming, Warning),
            (Decision::FieldBreakingChange, Batch, Block),
            (Decision::FieldBreakingChange, Streaming, ReviewRequired),
            (Decision::HardFail, Batch, Block),
            (Decision::HardFail, Streaming, ReviewRequired),
        ];

        let gate = Gate::new();
        for (decision, profile, expected) in cases {
            let outcome = gate.evaluate(decision, profile);
            assert_eq!(outcome.status, expected, "{decision} under {profile}");
            assert_eq!(
                outcome.blocks_deployment,
                expected == Block,
                "{decision} under {profile}"
            );
        }
    }

    #[test]
    fn test_action_required_names_the_cause() {
        let gate = Gate::new();
        assert_eq!(
            gate.evaluate(Decision::HardFail, ExecutionProfile::Batch).action_required,
            "Version incompatible, deployment blocked"
        );
        assert_eq!(
            gate.evaluate(Decision::FieldBreakingChange, ExecutionProfile::Streaming)
                .action_required,
            "Schema breaking change, manual review required"
        );
        assert_eq!(
            gate.evaluate(Decision::SoftPassDrift, ExecutionProfile::Batch).action_required,
            "Compatible drift, auto approved"
        );
        assert_eq!(
            gate.evaluate(Decision::Pass, ExecutionProfile::Streaming).action_required,
            "No compatibility impact"
        );
    }
}
