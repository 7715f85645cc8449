//! # Data Contracts Core
//!
//! Core data structures and types for the Data Contracts enforcement kernel.
//!
//! This crate provides the vocabulary shared by every other crate in the
//! workspace: the inputs of an enforcement run, the outcomes it produces, and
//! the report that crosses the kernel boundary.
//!
//! ## Key Concepts
//!
//! - **Contract**: A named, versioned field schema a data producer promises to uphold
//! - **Policy**: The expected version, compatibility mode, and execution profile of a pipeline
//! - **Drift**: Any structural difference between the expected and the actual schema
//! - **Compatibility Report**: The fixed-shape artifact summarizing one evaluation
//!
//! ## Example
//!
//! ```rust
//! use contracts_core::{CompatibilityMode, ContractBuilder, ExecutionProfile, PolicyBuilder};
//!
//! let contract = ContractBuilder::new("user_events")
//!     .version("1.2.0")
//!     .required_field("user_id", "string")
//!     .build();
//!
//! let policy = PolicyBuilder::new("1.2.0")
//!     .mode(CompatibilityMode::BackwardCompatible)
//!     .profile(ExecutionProfile::Batch)
//!     .build();
//!
//! assert_eq!(contract.version, policy.expected_version);
//! ```

pub mod builder;
pub mod collaborator;
pub mod contract;
pub mod error;
pub mod outcome;
pub mod report;

pub use builder::*;
pub use collaborator::*;
pub use contract::*;
pub use error::*;
pub use outcome::*;
pub use report::*;
