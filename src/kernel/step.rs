//! Step lifecycle: accumulator initialisation, the validate pass, the
//! accumulate pass, and batch re-checking of recorded steps.

use crate::abi::{CircuitOutputs, KernelInput};
use crate::config::KernelLimits;
use crate::utils::parallel::map_ordered;

use super::accumulate::update_outputs;
use super::bounds::{rebound_accumulator, validate_array_bounds};
use super::call_stack::validate_this_public_call_stack;
use super::inputs::validate_inputs;
use super::membership::{validate_state_reads, validate_state_transitions};
use super::report::{FailureCollector, KernelFailure, Severity};

/// Runs every validator over the step's call. Nothing short-circuits.
pub fn validate_step(input: &KernelInput, collector: &mut FailureCollector) {
    let call = input.public_call();
    let span = tracing::debug_span!(
        "validate_step",
        contract = %call.call_stack_item.contract_address,
        continuation = input.previous_outputs().is_some(),
    );
    let _enter = span.enter();

    let before = collector.len();
    validate_inputs(&call.call_stack_item, &call.bytecode_hash, collector);
    validate_this_public_call_stack(call, collector);
    validate_state_reads(call, collector);
    validate_state_transitions(call, collector);
    tracing::debug!(failures = collector.len() - before, "validation pass finished");
}

/// Folds the step's effects into a copy of `accumulator`.
///
/// The input accumulator is never modified; on error nothing is produced.
pub fn accumulate_step(
    input: &KernelInput,
    accumulator: &CircuitOutputs,
) -> Result<CircuitOutputs, KernelFailure> {
    let mut outputs = accumulator.clone();
    update_outputs(input.public_call(), &mut outputs)?;
    tracing::debug!(
        public_call_stack = outputs.end.public_call_stack.len(),
        state_transitions = outputs.end.state_transitions.len(),
        "accumulation pass finished"
    );
    Ok(outputs)
}

/// Accumulator a step starts from.
///
/// A continuation step inherits the previous aggregate, re-wrapped at the
/// kernel capacities of `limits`, and consumes the pending call it executes,
/// which must hash to the executed call item.
pub fn initialise_outputs(
    input: &KernelInput,
    limits: &KernelLimits,
    collector: &mut FailureCollector,
) -> CircuitOutputs {
    let Some(previous) = input.previous_outputs() else {
        return CircuitOutputs::empty(limits);
    };
    let mut outputs = previous.clone();
    rebound_accumulator(&mut outputs, limits, collector);
    match outputs.end.public_call_stack.pop_occupied() {
        None => collector.report(KernelFailure::EmptyPendingCallStack),
        Some(expected) => {
            let computed = input.public_call().call_stack_item.hash();
            collector.check(expected == computed, || KernelFailure::CallHashMismatch {
                expected,
                computed,
            });
        }
    }
    outputs
}

/// Result of running one kernel step end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Next aggregate; `None` when accumulation was rejected.
    pub outputs: Option<CircuitOutputs>,
    pub failures: Vec<KernelFailure>,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.failures
            .iter()
            .any(|failure| failure.severity() == Severity::Fatal)
    }
}

/// Initialises, validates and accumulates a single step.
///
/// Inconsistent `limits` stop the step before anything else runs. Any fatal
/// failure found while initialising or validating skips accumulation.
pub fn run_step(input: &KernelInput, limits: &KernelLimits) -> StepReport {
    let mut collector = FailureCollector::new();
    if let Err(err) = limits.validate() {
        collector.report(KernelFailure::InvalidLimits(err));
        return StepReport {
            outputs: None,
            failures: collector.into_failures(),
        };
    }
    let accumulator = initialise_outputs(input, limits, &mut collector);
    validate_array_bounds(input.public_call(), limits, &mut collector);
    validate_step(input, &mut collector);
    let outputs = if collector.has_fatal() {
        None
    } else {
        match accumulate_step(input, &accumulator) {
            Ok(outputs) => Some(outputs),
            Err(failure) => {
                collector.report(failure);
                None
            }
        }
    };
    StepReport {
        outputs,
        failures: collector.into_failures(),
    }
}

/// Re-checks independent steps, one report per input in input order.
pub fn audit_steps(inputs: &[KernelInput], limits: &KernelLimits) -> Vec<StepReport> {
    tracing::debug!(steps = inputs.len(), "auditing kernel steps");
    map_ordered(inputs, |input| run_step(input, limits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{
        ContractAddress, FunctionSelector, PreviousKernelData, PublicCallData, PublicCallStackItem,
        PublicCircuitPublicInputs, PublicKernelInputs, PublicKernelInputsNoPreviousKernel,
    };
    use crate::field::FieldElement;
    use crate::merkle::PublicDataTree;

    fn call(limits: &KernelLimits) -> PublicCallData {
        let mut item = PublicCallStackItem {
            contract_address: ContractAddress::from(11u64),
            function_data: Default::default(),
            public_inputs: PublicCircuitPublicInputs::empty(limits),
        };
        item.function_data.function_selector = FunctionSelector(3);
        PublicCallData {
            call_stack_item: item,
            public_call_stack_preimages: Vec::new(),
            bytecode_hash: FieldElement::ONE,
            public_data_tree_root: PublicDataTree::new().root(),
            state_reads_sibling_paths: Vec::new(),
            state_transitions_sibling_paths: Vec::new(),
        }
    }

    #[test]
    fn first_step_with_no_effects_is_valid() {
        let limits = KernelLimits::default();
        let input = KernelInput::from(PublicKernelInputsNoPreviousKernel {
            public_call: call(&limits),
        });
        let report = run_step(&input, &limits);
        assert!(report.is_valid(), "{:?}", report.failures);
        let outputs = report.outputs.expect("outputs");
        assert!(!outputs.is_private);
        assert!(outputs.end.public_call_stack.is_empty());
        assert!(outputs.end.state_transitions.is_empty());
        assert_eq!(
            outputs.end.public_call_stack.capacity(),
            limits.kernel_public_call_stack
        );
    }

    #[test]
    fn continuation_with_nothing_pending_is_structural() {
        let limits = KernelLimits::default();
        let input = KernelInput::from(PublicKernelInputs {
            previous_kernel: PreviousKernelData {
                public_inputs: CircuitOutputs::empty(&limits),
            },
            public_call: call(&limits),
        });
        let mut collector = FailureCollector::new();
        initialise_outputs(&input, &limits, &mut collector);
        assert_eq!(
            collector.failures(),
            &[KernelFailure::EmptyPendingCallStack]
        );
    }

    #[test]
    fn inconsistent_limits_stop_the_step() {
        let limits = KernelLimits {
            kernel_state_transitions: 2,
            ..KernelLimits::default()
        };
        let input = KernelInput::from(PublicKernelInputsNoPreviousKernel {
            public_call: call(&KernelLimits::default()),
        });
        let report = run_step(&input, &limits);
        assert!(report.outputs.is_none());
        assert!(report.has_fatal());
        assert!(matches!(
            report.failures.as_slice(),
            [KernelFailure::InvalidLimits(_)]
        ));
    }
}
