//! Data contract and policy types.
//!
//! This module contains the inputs of an enforcement run: the contract a data
//! producer declares, and the policy the consuming pipeline enforces against it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field schema of a contract, keyed by field name.
///
/// Key order carries no meaning; a sorted map keeps iteration stable.
pub type Schema = BTreeMap<String, FieldSpec>;

/// A data contract: a named, versioned field schema.
///
/// # Example
///
/// ```rust
/// use contracts_core::{Contract, FieldSpec, Schema};
///
/// let mut schema = Schema::new();
/// schema.insert("user_id".to_string(), FieldSpec::new("string", true));
///
/// let contract = Contract {
///     name: "user_events".to_string(),
///     version: "1.0.0".to_string(),
///     schema,
/// };
/// assert!(contract.field("user_id").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Name identifying the dataset this contract covers
    #[serde(default)]
    pub name: String,

    /// Semantic version of the contract (`major.minor.patch`)
    pub version: String,

    /// Field definitions
    #[serde(alias = "fields")]
    pub schema: Schema,
}

impl Contract {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.schema.get(name)
    }
}

/// Declared type and requiredness of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field data type (e.g., "string", "int", "timestamp")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Whether producers must always populate the field
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// Creates a field spec.
    pub fn new(field_type: impl Into<String>, required: bool) -> Self {
        Self {
            field_type: field_type.into(),
            required,
        }
    }
}

/// How much drift the consuming pipeline tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityMode {
    /// Any drift or version movement is treated as breaking
    #[serde(alias = "strict")]
    Strict,
    /// Additive drift and upgrades are tolerated, downgrades are not
    #[serde(alias = "backward_compatible", alias = "forward_minor")]
    BackwardCompatible,
    /// Everything short of a breaking field change is tolerated
    #[serde(alias = "permissive", alias = "override")]
    Permissive,
}

impl CompatibilityMode {
    /// All modes, in declaration order.
    pub const ALL: [CompatibilityMode; 3] = [
        CompatibilityMode::Strict,
        CompatibilityMode::BackwardCompatible,
        CompatibilityMode::Permissive,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityMode::Strict => "STRICT",
            CompatibilityMode::BackwardCompatible => "BACKWARD_COMPATIBLE",
            CompatibilityMode::Permissive => "PERMISSIVE",
        }
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution style of the surrounding pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionProfile {
    /// Halt on failure
    #[default]
    #[serde(alias = "batch")]
    Batch,
    /// Log and continue
    #[serde(alias = "streaming")]
    Streaming,
}

impl ExecutionProfile {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionProfile::Batch => "BATCH",
            ExecutionProfile::Streaming => "STREAMING",
        }
    }
}

impl fmt::Display for ExecutionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compatibility policy applied to one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Contract version the pipeline was built against
    pub expected_version: String,

    /// Drift tolerance
    pub compatibility_mode: CompatibilityMode,

    /// Batch pipelines block, streaming pipelines flag for review
    #[serde(default)]
    pub execution_profile: ExecutionProfile,
}

impl Policy {
    /// Creates a policy.
    pub fn new(
        expected_version: impl Into<String>,
        compatibility_mode: CompatibilityMode,
        execution_profile: ExecutionProfile,
    ) -> Self {
        Self {
            expected_version: expected_version.into(),
            compatibility_mode,
            execution_profile,
        }
    }
}
