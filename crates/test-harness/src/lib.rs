//! Test harness for sweep naming and molding path workflows.
//!
//! Provides programmatic tools for building named sweeps and moldings,
//! verifying them at every step, and reporting what failed.
//!
//! # Key Components
//!
//! - [`SweepBuilder`]: Fluent API for sweeping a profile and naming the result
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`helpers`]: Profile, path and fragment constructors
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use workflow::{NameSnapshot, NamedSweep, SweepBuilder};
