//! Reconciliation of declared nested-call hashes with their preimages.

use crate::abi::{PublicCallData, PublicCallStackItem};
use crate::field::FieldElement;
use crate::utils::BoundedVec;

use super::report::{FailureCollector, KernelFailure, WitnessKind};

/// Reconciles declared nested-call hashes with their preimages.
///
/// A zero hash marks an unused slot; it reconciles to zero without looking at
/// the preimage. Every other entry must equal the hash of the preimage at the
/// same index.
pub fn validate_call_stack(
    stack: &BoundedVec<FieldElement>,
    preimages: &[PublicCallStackItem],
    collector: &mut FailureCollector,
) {
    for (index, declared) in stack.iter().enumerate() {
        // Assumes no real item ever hashes to zero.
        let recomputed = if declared.is_zero() {
            FieldElement::ZERO
        } else {
            match preimages.get(index) {
                Some(preimage) => preimage.hash(),
                None => {
                    collector.report(KernelFailure::MissingWitness {
                        kind: WitnessKind::CallStackPreimage,
                        index,
                    });
                    continue;
                }
            }
        };
        collector.check(recomputed == *declared, || KernelFailure::CallStackMismatch {
            index,
            declared: *declared,
            recomputed,
        });
    }
}

/// Applies [`validate_call_stack`] to the call's own nested calls.
pub fn validate_this_public_call_stack(call: &PublicCallData, collector: &mut FailureCollector) {
    validate_call_stack(
        &call.call_stack_item.public_inputs.public_call_stack,
        &call.public_call_stack_preimages,
        collector,
    );
}
