//! Error types for contract enforcement.
//!
//! None of these cross the enforcement boundary: the engine folds every one of
//! them into a `HARD_FAIL` report. They exist so the report can say why.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, EnforcementError>;

/// Which of the two compared versions a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionRole {
    /// The policy's expected version
    Expected,
    /// The contract's declared version
    Contract,
}

impl fmt::Display for VersionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRole::Expected => f.write_str("expected"),
            VersionRole::Contract => f.write_str("contract"),
        }
    }
}

/// Main error type for enforcement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnforcementError {
    /// A version string is not `major.minor.patch`
    #[error("Invalid {role} version '{value}': {reason}")]
    VersionParse {
        /// Which version failed
        role: VersionRole,
        /// The offending string
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// The contract could not be loaded
    #[error("Contract load failed: {0}")]
    ContractLoad(String),

    /// The policy could not be loaded
    #[error("Policy load failed: {0}")]
    PolicyLoad(String),
}

impl EnforcementError {
    /// Creates a version parse error.
    pub fn version_parse(
        role: VersionRole,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::VersionParse {
            role,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a contract load error.
    pub fn contract_load(message: impl Into<String>) -> Self {
        Self::ContractLoad(message.into())
    }

    /// Creates a policy load error.
    pub fn policy_load(message: impl Into<String>) -> Self {
        Self::PolicyLoad(message.into())
    }

    /// Report-level classification of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            EnforcementError::VersionParse { .. } => FailureKind::VersionParseError,
            EnforcementError::ContractLoad(_) => FailureKind::ContractLoadError,
            EnforcementError::PolicyLoad(_) => FailureKind::PolicyLoadError,
        }
    }

    /// Whether the run never got valid inputs to evaluate.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            EnforcementError::ContractLoad(_) | EnforcementError::PolicyLoad(_)
        )
    }
}

/// Boxed cause of a [`LoadError`].
pub type LoadCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a contract or policy loader.
///
/// Names the source that could not be loaded and keeps the underlying error
/// reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{location}: {cause}")]
pub struct LoadError {
    location: String,
    #[source]
    cause: LoadCause,
}

impl LoadError {
    /// Creates a load error for `location` caused by `cause`.
    pub fn new(location: impl Into<String>, cause: impl Into<LoadCause>) -> Self {
        Self {
            location: location.into(),
            cause: cause.into(),
        }
    }

    /// The source that failed to load.
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Failure classification carried in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    VersionParseError,
    ContractLoadError,
    PolicyLoadError,
}
