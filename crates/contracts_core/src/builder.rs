//! Builder pattern for creating contracts and policies.
//!
//! This module provides ergonomic builders for constructing enforcement inputs
//! with a fluent API, mostly for embedding callers and tests.

use crate::{CompatibilityMode, Contract, ExecutionProfile, FieldSpec, Policy, Schema};

/// Builder for creating a `Contract`.
///
/// # Example
///
/// ```rust
/// use contracts_core::ContractBuilder;
///
/// let contract = ContractBuilder::new("user_events")
///     .version("1.2.0")
///     .required_field("user_id", "string")
///     .optional_field("session_id", "string")
///     .build();
///
/// assert_eq!(contract.version, "1.2.0");
/// assert_eq!(contract.schema.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ContractBuilder {
    name: String,
    version: String,
    schema: Schema,
}

impl ContractBuilder {
    /// Creates a new contract builder at version `1.0.0`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            schema: Schema::new(),
        }
    }

    /// Sets the contract version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a field, replacing any earlier field with the same name.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.schema.insert(name.into(), spec);
        self
    }

    /// Adds a required field.
    pub fn required_field(self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.field(name, FieldSpec::new(field_type, true))
    }

    /// Adds an optional field.
    pub fn optional_field(self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.field(name, FieldSpec::new(field_type, false))
    }

    /// Replaces the whole schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Builds the contract.
    pub fn build(self) -> Contract {
        Contract {
            name: self.name,
            version: self.version,
            schema: self.schema,
        }
    }
}

/// Builder for creating a `Policy`.
///
/// Defaults to `STRICT` mode and the `BATCH` profile, the most conservative
/// combination.
///
/// # Example
///
/// ```rust
/// use contracts_core::{CompatibilityMode, ExecutionProfile, PolicyBuilder};
///
/// let policy = PolicyBuilder::new("1.0.0")
///     .mode(CompatibilityMode::Permissive)
///     .profile(ExecutionProfile::Streaming)
///     .build();
///
/// assert_eq!(policy.compatibility_mode, CompatibilityMode::Permissive);
/// ```
#[derive(Debug)]
pub struct PolicyBuilder {
    expected_version: String,
    compatibility_mode: CompatibilityMode,
    execution_profile: ExecutionProfile,
}

impl PolicyBuilder {
    /// Creates a new policy builder.
    pub fn new(expected_version: impl Into<String>) -> Self {
        Self {
            expected_version: expected_version.into(),
            compatibility_mode: CompatibilityMode::Strict,
            execution_profile: ExecutionProfile::Batch,
        }
    }

    /// Sets the compatibility mode.
    pub fn mode(mut self, mode: CompatibilityMode) -> Self {
        self.compatibility_mode = mode;
        self
    }

    /// Sets the execution profile.
    pub fn profile(mut self, profile: ExecutionProfile) -> Self {
        self.execution_profile = profile;
        self
    }

    /// Builds the policy.
    pub fn build(self) -> Policy {
        Policy {
            expected_version: self.expected_version,
            compatibility_mode: self.compatibility_mode,
            execution_profile: self.execution_profile,
        }
    }
}
