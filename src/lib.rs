//! Validation and accumulation logic of the public kernel step.
//!
//! The crate checks that a single public function invocation is well formed,
//! that every storage read and write it declares is consistent with a
//! committed snapshot of the public data tree, and that the nested calls it
//! declares match their preimages. It then folds the invocation's effects
//! into the aggregate handed to the next step.
//!
//! The high-level entry points are [`validate_step`] and [`accumulate_step`];
//! [`run_step`] combines them for one step and [`audit_steps`] re-checks a
//! batch of recorded steps, in parallel when the `parallel` feature is on.

pub mod abi;
pub mod config;
pub mod field;
pub mod hash;
pub mod kernel;
pub mod merkle;
pub mod ser;
pub mod utils;

pub use abi::{CircuitOutputs, KernelInput, PublicCallData, PublicCallStackItem};
pub use config::{ConfigError, KernelLimits};
pub use field::FieldElement;
pub use kernel::{
    accumulate_step, audit_steps, run_step, validate_step, FailureCollector, KernelFailure,
    Severity, StepReport,
};
