//! Collaborator traits at the kernel boundary.
//!
//! The kernel neither reads contracts from anywhere nor writes reports
//! anywhere. Loaders hand it already-materialized inputs; publishers take the
//! finished report. Implementations live outside the core and can be swapped
//! freely (JSON files today, other sources later).

use crate::{CompatibilityReport, Contract, LoadError, Policy};

/// Error reported by a [`ContractLoader`].
pub type ContractLoadError = LoadError;

/// Error reported by a [`PolicyLoader`].
pub type PolicyLoadError = LoadError;

/// Produces a [`Contract`] from some source.
///
/// Loaders must fail closed: if the source is missing or malformed, return an
/// error. The enforcer treats that as `HARD_FAIL`, never as `PASS`.
///
/// # Example
///
/// ```rust
/// use contracts_core::{Contract, ContractLoader, ContractLoadError, Schema};
///
/// struct Fixed;
///
/// impl ContractLoader for Fixed {
///     fn load(&self, _source: &str) -> Result<Contract, ContractLoadError> {
///         Ok(Contract {
///             name: "fixed".to_string(),
///             version: "1.0.0".to_string(),
///             schema: Schema::new(),
///         })
///     }
/// }
/// ```
pub trait ContractLoader: Send + Sync {
    /// Loads the contract identified by `source`.
    fn load(&self, source: &str) -> Result<Contract, ContractLoadError>;
}

/// Produces a [`Policy`] from some source, with the same fail-closed rule as
/// [`ContractLoader`].
pub trait PolicyLoader: Send + Sync {
    /// Loads the policy identified by `source`.
    fn load(&self, source: &str) -> Result<Policy, PolicyLoadError>;
}

/// Sink for finished reports.
///
/// Single-method capability: accept a report. Publishing never feeds back into
/// the gate outcome, so implementations log their own failures.
///
/// # Example
///
/// ```rust
/// use contracts_core::{CompatibilityReport, MetadataPublisher};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collecting(Mutex<Vec<CompatibilityReport>>);
///
/// impl MetadataPublisher for Collecting {
///     fn publish(&self, report: &CompatibilityReport) {
///         if let Ok(mut reports) = self.0.lock() {
///             reports.push(report.clone());
///         }
///     }
/// }
/// ```
pub trait MetadataPublisher: Send + Sync {
    /// Accepts a finished report.
    fn publish(&self, report: &CompatibilityReport);
}

impl<P: MetadataPublisher + ?Sized> MetadataPublisher for Box<P> {
    fn publish(&self, report: &CompatibilityReport) {
        (**self).publish(report)
    }
}

impl<P: MetadataPublisher> MetadataPublisher for [P] {
    fn publish(&self, report: &CompatibilityReport) {
        for publisher in self {
            publisher.publish(report);
        }
    }
}

impl<P: MetadataPublisher> MetadataPublisher for Vec<P> {
    fn publish(&self, report: &CompatibilityReport) {
        self.as_slice().publish(report)
    }
}
