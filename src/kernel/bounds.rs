//! Declared array capacities checked against the configured limits.

use crate::abi::{CircuitOutputs, PublicCallData};
use crate::config::KernelLimits;
use crate::utils::array::BoundedVec;

use super::report::{BoundedArray, FailureCollector, KernelFailure};

fn mismatch<T>(array: BoundedArray, values: &BoundedVec<T>, limit: usize) -> KernelFailure {
    KernelFailure::ArrayBoundMismatch {
        array,
        declared: values.capacity(),
        len: values.len(),
        limit,
    }
}

fn check_bound<T>(
    array: BoundedArray,
    values: &BoundedVec<T>,
    limit: usize,
    collector: &mut FailureCollector,
) {
    collector.check(values.capacity() == limit, || mismatch(array, values, limit));
}

/// Reports every per-call array whose capacity differs from `limits`.
///
/// An array that also holds more entries than its limit is fatal.
pub fn validate_array_bounds(
    call: &PublicCallData,
    limits: &KernelLimits,
    collector: &mut FailureCollector,
) {
    let inputs = &call.call_stack_item.public_inputs;
    check_bound(BoundedArray::StateReads, &inputs.state_reads, limits.state_reads, collector);
    check_bound(
        BoundedArray::StateTransitions,
        &inputs.state_transitions,
        limits.state_transitions,
        collector,
    );
    check_bound(
        BoundedArray::PublicCallStack,
        &inputs.public_call_stack,
        limits.public_call_stack,
        collector,
    );
    check_bound(
        BoundedArray::ReturnValues,
        &inputs.return_values,
        limits.return_values,
        collector,
    );
}

fn rebound<T>(
    array: BoundedArray,
    values: &mut BoundedVec<T>,
    limit: usize,
    collector: &mut FailureCollector,
) {
    if values.capacity() == limit {
        return;
    }
    collector.report(mismatch(array, values, limit));
    if let Err(err) = values.rebound(limit) {
        tracing::debug!(%array, %err, "inherited array keeps its declared capacity");
    }
}

/// Brings an inherited accumulator back to the configured kernel capacities.
///
/// Each mismatch is reported. Arrays that fit are re-wrapped at the limit;
/// overfull ones are left as they are behind a fatal failure.
pub fn rebound_accumulator(
    outputs: &mut CircuitOutputs,
    limits: &KernelLimits,
    collector: &mut FailureCollector,
) {
    rebound(
        BoundedArray::EndPublicCallStack,
        &mut outputs.end.public_call_stack,
        limits.kernel_public_call_stack,
        collector,
    );
    rebound(
        BoundedArray::EndStateTransitions,
        &mut outputs.end.state_transitions,
        limits.kernel_state_transitions,
        collector,
    );
}
