//! Main enforcement engine.
//!
//! This module provides the `Enforcer` that runs one evaluation end to end:
//! version comparison, drift detection, classification, gating and report
//! assembly. Every evaluation is a pure function of its inputs; the enforcer
//! holds configuration only, so one instance can be shared across threads.

use crate::{
    DriftDetector, ExitStatus, Gate, ImpactClassifier, ReportParts, ReportPublisher,
    VersionComparator,
};
use contracts_core::{
    CompatibilityMode, CompatibilityReport, ComparisonResult, Contract, ContractLoader,
    EnforcementError, ExecutionProfile, MetadataPublisher, Policy, PolicyLoader, Schema,
};
use tracing::{debug, error, info, warn};

/// Tunable behaviour of the enforcer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforcerConfig {
    /// Let patch differences change the comparison result
    pub patch_sensitive: bool,
}

impl EnforcerConfig {
    /// Creates the default configuration (patch-insensitive).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets patch sensitivity.
    pub fn with_patch_sensitive(mut self, patch_sensitive: bool) -> Self {
        self.patch_sensitive = patch_sensitive;
        self
    }
}

/// Where to load the inputs of an evaluation from.
#[derive(Debug, Clone, Copy)]
pub struct EnforcementSources<'a> {
    /// The contract under evaluation
    pub contract: &'a str,
    /// Baseline contract holding the expected schema; drift detection is
    /// skipped without one
    pub baseline: Option<&'a str>,
    /// The compatibility policy
    pub policy: &'a str,
}

/// Result of one evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The sealed report
    pub report: CompatibilityReport,
    /// How the calling process should exit
    pub exit_status: ExitStatus,
    /// The error folded into the report, if any
    pub error: Option<EnforcementError>,
}

impl Evaluation {
    /// Numeric process exit code.
    pub fn exit_code(&self) -> i32 {
        self.exit_status.code()
    }

    /// Hands the report to a sink.
    pub fn publish_to<P: MetadataPublisher + ?Sized>(&self, publisher: &P) {
        publisher.publish(&self.report);
    }
}

/// Runs enforcement evaluations.
///
/// # Example
///
/// ```rust
/// use contracts_core::{CompatibilityMode, ContractBuilder, Decision, PolicyBuilder};
/// use contracts_enforcer::Enforcer;
///
/// let baseline = ContractBuilder::new("orders")
///     .version("1.2.0")
///     .required_field("id", "int")
///     .build();
/// let contract = baseline.clone();
/// let policy = PolicyBuilder::new("1.2.0")
///     .mode(CompatibilityMode::Strict)
///     .build();
///
/// let evaluation = Enforcer::new().evaluate(&contract, Some(&baseline.schema), &policy);
///
/// assert_eq!(evaluation.report.decision(), Decision::Pass);
/// assert_eq!(evaluation.exit_code(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Enforcer {
    comparator: VersionComparator,
    detector: DriftDetector,
    classifier: ImpactClassifier,
    gate: Gate,
    publisher: ReportPublisher,
}

impl Enforcer {
    /// Creates an enforcer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with the given configuration.
    pub fn with_config(config: EnforcerConfig) -> Self {
        Self {
            comparator: VersionComparator::new().with_patch_sensitivity(config.patch_sensitive),
            ..Self::default()
        }
    }

    /// Evaluates `contract` against `policy`.
    ///
    /// `expected_schema` is the schema the pipeline was built against. When it
    /// is `None`, drift detection is skipped and the decision rests on the
    /// version comparison alone.
    ///
    /// Never fails: a malformed version becomes `HARD_FAIL` / `CRITICAL` with
    /// the parse error recorded in the report.
    pub fn evaluate(
        &self,
        contract: &Contract,
        expected_schema: Option<&Schema>,
        policy: &Policy,
    ) -> Evaluation {
        info!("Expected version: {}", policy.expected_version);
        info!("Contract version: {}", contract.version);
        debug!(
            "Compatibility mode: {}, execution profile: {}",
            policy.compatibility_mode, policy.execution_profile
        );

        let (comparison, patch_changed, version_error) = match self
            .comparator
            .compare(&policy.expected_version, &contract.version)
        {
            Ok(c) => (c.result, c.patch_changed, None),
            Err(e) => {
                error!("{e}");
                (ComparisonResult::Incomparable, false, Some(e))
            }
        };
        info!("Version comparison result: {comparison}");
        if patch_changed {
            debug!("Patch versions differ (informational)");
        }

        let findings = match expected_schema {
            Some(expected) => self.detector.detect(expected, &contract.schema),
            None => {
                warn!("No baseline schema supplied, field drift detection skipped");
                Vec::new()
            }
        };

        let classification =
            self.classifier
                .classify(comparison, &findings, policy.compatibility_mode);
        info!(
            "Decision: {} (impact tier {}, {} finding(s))",
            classification.decision,
            classification.impact_tier,
            findings.len()
        );

        let gate = self
            .gate
            .evaluate(classification.decision, policy.execution_profile);

        let report = self.publisher.assemble(ReportParts {
            contract_name: Some(&contract.name),
            expected_version: Some(&policy.expected_version),
            contract_version: Some(&contract.version),
            comparison,
            patch_changed,
            compatibility_mode: Some(policy.compatibility_mode),
            execution_profile: policy.execution_profile,
            classification,
            findings,
            gate,
            failure: version_error.as_ref(),
        });

        Evaluation {
            report,
            exit_status: gate.exit_status(),
            error: version_error,
        }
    }

    /// Loads the inputs through the given loaders and evaluates them.
    ///
    /// Fails closed: if the policy, the contract or a named baseline cannot be
    /// loaded, the result is a `HARD_FAIL` / `CRITICAL` report with
    /// [`ExitStatus::InputFailure`]. Without a policy the gate assumes `BATCH`.
    pub fn evaluate_sources(
        &self,
        contracts: &dyn ContractLoader,
        policies: &dyn PolicyLoader,
        sources: EnforcementSources<'_>,
    ) -> Evaluation {
        let policy = match policies.load(sources.policy) {
            Ok(policy) => policy,
            Err(e) => {
                return self.fail_closed(EnforcementError::policy_load(e.to_string()), None, None);
            }
        };

        let contract = match contracts.load(sources.contract) {
            Ok(contract) => contract,
            Err(e) => {
                return self.fail_closed(
                    EnforcementError::contract_load(e.to_string()),
                    Some(&policy),
                    None,
                );
            }
        };

        let baseline = match sources.baseline.map(|b| contracts.load(b)).transpose() {
            Ok(baseline) => baseline,
            Err(e) => {
                return self.fail_closed(
                    EnforcementError::contract_load(format!("baseline {e}")),
                    Some(&policy),
                    Some(&contract),
                );
            }
        };

        self.evaluate(&contract, baseline.as_ref().map(|b| &b.schema), &policy)
    }

    /// Builds the report for a run whose inputs could not be loaded.
    pub fn fail_closed(
        &self,
        failure: EnforcementError,
        policy: Option<&Policy>,
        contract: Option<&Contract>,
    ) -> Evaluation {
        error!("{failure}");

        let comparison = ComparisonResult::Incomparable;
        let mode = policy.map(|p| p.compatibility_mode);
        let profile = policy
            .map(|p| p.execution_profile)
            .unwrap_or(ExecutionProfile::Batch);

        let classification =
            self.classifier
                .classify(comparison, &[], mode.unwrap_or(CompatibilityMode::Strict));
        let gate = self.gate.evaluate(classification.decision, profile);

        let report = self.publisher.assemble(ReportParts {
            contract_name: contract.map(|c| c.name.as_str()),
            expected_version: policy.map(|p| p.expected_version.as_str()),
            contract_version: contract.map(|c| c.version.as_str()),
            comparison,
            patch_changed: false,
            compatibility_mode: mode,
            execution_profile: profile,
            classification,
            findings: Vec::new(),
            gate,
            failure: Some(&failure),
        });

        Evaluation {
            report,
            exit_status: ExitStatus::InputFailure,
            error: Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_core::{
        ContractBuilder, ContractLoadError, Decision, DriftCategory, FailureKind, GateStatus,
        ImpactTier, LoadError, PolicyBuilder, PolicyLoadError,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct MapLoader {
        contracts: HashMap<&'static str, Contract>,
        policies: HashMap<&'static str, Policy>,
    }

    impl ContractLoader for MapLoader {
        fn load(&self, source: &str) -> Result<Contract, ContractLoadError> {
            self.contracts
                .get(source)
                .cloned()
                .ok_or_else(|| LoadError::new(source, "not found"))
        }
    }

    impl PolicyLoader for MapLoader {
        fn load(&self, source: &str) -> Result<Policy, PolicyLoadError> {
            self.policies
                .get(source)
                .cloned()
                .ok_or_else(|| LoadError::new(source, "not found"))
        }
    }

    fn loader() -> MapLoader {
        let v1 = ContractBuilder::new("spend")
            .version("1.0.0")
            .required_field("city", "string")
            .required_field("spend", "int")
            .build();
        let v2 = ContractBuilder::new("spend")
            .version("1.1.0")
            .required_field("city", "string")
            .required_field("spend", "int")
            .optional_field("channel", "string")
            .build();
        let policy = PolicyBuilder::new("1.0.0")
            .mode(CompatibilityMode::BackwardCompatible)
            .profile(ExecutionProfile::Streaming)
            .build();

        MapLoader {
            contracts: HashMap::from([("v1", v1), ("v2", v2)]),
            policies: HashMap::from([("policy", policy)]),
        }
    }

    fn sources<'a>(contract: &'a str, baseline: Option<&'a str>, policy: &'a str) -> EnforcementSources<'a> {
        EnforcementSources {
            contract,
            baseline,
            policy,
        }
    }

    #[test]
    fn test_evaluate_sources_additive_drift() {
        let loader = loader();
        let evaluation =
            Enforcer::new().evaluate_sources(&loader, &loader, sources("v2", Some("v1"), "policy"));

        assert_eq!(evaluation.report.decision(), Decision::SoftPassDrift);
        assert_eq!(evaluation.report.impact_tier(), ImpactTier::Low);
        assert_eq!(
            evaluation.report.drift_category(),
            &[DriftCategory::FieldAdded]
        );
        assert!(evaluation.report.requires_review());
        assert_eq!(evaluation.exit_code(), 0);
        assert!(evaluation.error.is_none());
    }

    #[test]
    fn test_missing_baseline_skips_drift() {
        let loader = loader();
        let evaluation =
            Enforcer::new().evaluate_sources(&loader, &loader, sources("v2", None, "policy"));

        assert!(evaluation.report.findings().is_empty());
        assert_eq!(evaluation.report.decision(), Decision::Pass);
    }

    #[test]
    fn test_policy_load_failure_fails_closed() {
        let loader = loader();
        let evaluation =
            Enforcer::new().evaluate_sources(&loader, &loader, sources("v2", Some("v1"), "nope"));

        let report = &evaluation.report;
        assert_eq!(report.decision(), Decision::HardFail);
        assert_eq!(report.impact_tier(), ImpactTier::Critical);
        assert_eq!(report.comparison_result(), ComparisonResult::Incomparable);
        assert_eq!(report.compatibility_mode(), None);
        assert_eq!(report.expected_version(), None);
        assert_eq!(report.execution_profile(), ExecutionProfile::Batch);
        assert!(report.blocks_deployment());
        assert_eq!(report.gate_status(), GateStatus::Block);
        assert_eq!(
            report.failure().map(|f| f.kind),
            Some(FailureKind::PolicyLoadError)
        );
        assert!(report.failure().is_some_and(|f| f.message.contains("nope: not found")));
        assert_eq!(evaluation.exit_status, ExitStatus::InputFailure);
        assert_eq!(evaluation.exit_code(), 1);
    }

    #[test]
    fn test_contract_load_failure_keeps_policy_fields() {
        let loader = loader();
        let evaluation =
            Enforcer::new().evaluate_sources(&loader, &loader, sources("v9", None, "policy"));

        let report = &evaluation.report;
        assert_eq!(report.decision(), Decision::HardFail);
        assert_eq!(report.expected_version(), Some("1.0.0"));
        assert_eq!(report.contract_version(), None);
        // Streaming policy was loaded, so the gate does not block.
        assert!(!report.blocks_deployment());
        assert!(report.requires_review());
        assert_eq!(report.gate_status(), GateStatus::ReviewRequired);
        assert_eq!(evaluation.exit_code(), 1);
    }

    #[test]
    fn test_baseline_load_failure_fails_closed() {
        let loader = loader();
        let evaluation =
            Enforcer::new().evaluate_sources(&loader, &loader, sources("v2", Some("v0"), "policy"));

        assert_eq!(evaluation.report.decision(), Decision::HardFail);
        assert_eq!(evaluation.report.contract_version(), Some("1.1.0"));
        let failure = evaluation.report.failure().expect("failure detail");
        assert!(failure.message.contains("baseline v0"));
    }

    #[test]
    fn test_patch_sensitive_config() {
        let contract = ContractBuilder::new("c").version("1.0.1").build();
        let policy = PolicyBuilder::new("1.0.0").build();

        let relaxed = Enforcer::new().evaluate(&contract, None, &policy);
        assert_eq!(relaxed.report.comparison_result(), ComparisonResult::ExactMatch);
        assert!(relaxed.report.patch_changed());
        assert_eq!(relaxed.report.decision(), Decision::Pass);

        let strict = Enforcer::with_config(EnforcerConfig::new().with_patch_sensitive(true))
            .evaluate(&contract, None, &policy);
        assert_eq!(strict.report.comparison_result(), ComparisonResult::MinorUpgrade);
        assert_eq!(strict.report.decision(), Decision::FieldBreakingChange);
        assert_eq!(strict.exit_code(), 2);
    }
}
