//! # Data Contracts Enforcer
//!
//! Enforcement decision engine for data contracts. Given a contract, the
//! schema the pipeline expects and a compatibility policy, it decides whether
//! the incoming data shape is acceptable:
//!
//! - Version comparison (`major.minor.patch`, patch-insensitive by default)
//! - Schema drift detection with deterministic finding order
//! - Decision and impact classification over a total decision table
//! - CI/CD gating by execution profile
//! - Assembly of the fixed-shape compatibility report
//!
//! ## Example
//!
//! ```rust
//! use contracts_core::{
//!     CompatibilityMode, ContractBuilder, Decision, ExecutionProfile, PolicyBuilder,
//! };
//! use contracts_enforcer::Enforcer;
//!
//! let baseline = ContractBuilder::new("orders")
//!     .version("1.0.0")
//!     .required_field("id", "int")
//!     .required_field("amount", "int")
//!     .build();
//! let contract = ContractBuilder::new("orders")
//!     .version("2.0.0")
//!     .required_field("id", "int")
//!     .build();
//! let policy = PolicyBuilder::new("1.0.0")
//!     .mode(CompatibilityMode::Strict)
//!     .profile(ExecutionProfile::Batch)
//!     .build();
//!
//! let evaluation = Enforcer::new().evaluate(&contract, Some(&baseline.schema), &policy);
//!
//! assert_eq!(evaluation.report.decision(), Decision::FieldBreakingChange);
//! assert!(evaluation.report.blocks_deployment());
//! assert_eq!(evaluation.exit_code(), 2);
//! ```

mod classifier;
mod drift;
mod engine;
mod gate;
mod publisher;
mod version;

pub use classifier::*;
pub use drift::*;
pub use engine::*;
pub use gate::*;
pub use publisher::*;
pub use version::*;
