//! Public kernel step logic.
//!
//! A step checks one public call and folds its effects into the running
//! aggregate. Checking happens in two independent passes:
//!
//! 1. **Validate** ([`validate_step`]): call-kind and identity preconditions,
//!    nested-call hash reconciliation, and membership of every declared read
//!    and transition against the call's tree snapshot. Every violation is
//!    recorded in a [`FailureCollector`]; nothing short-circuits.
//! 2. **Accumulate** ([`accumulate_step`]): appends the call's nested calls and
//!    tree writes to the aggregate. Capacity overflow is the only hard error
//!    and leaves the aggregate untouched.
//!
//! [`run_step`] wires both passes behind [`initialise_outputs`], which for
//! continuation steps also consumes the pending call being executed. Before
//! validating, it checks the limits themselves and every declared array
//! capacity against them ([`validate_array_bounds`]); a fatal failure there
//! skips accumulation.

mod accumulate;
mod bounds;
mod call_stack;
mod encoding;
mod inputs;
mod membership;
mod report;
mod step;

pub use accumulate::update_outputs;
pub use bounds::{rebound_accumulator, validate_array_bounds};
pub use call_stack::{validate_call_stack, validate_this_public_call_stack};
pub use encoding::{leaf_index, leaf_value};
pub use inputs::validate_inputs;
pub use membership::{
    check_membership, validate_state_reads, validate_state_transitions, verify, MembershipError,
};
pub use report::{
    BoundedArray, CallKindViolation, FailureCollector, KernelFailure, MembershipContext, OutputArray, Severity,
    WitnessKind,
};
pub use step::{
    accumulate_step, audit_steps, initialise_outputs, run_step, validate_step, StepReport,
};
