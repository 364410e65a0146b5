//! Call-kind and identity preconditions of the executed public call.

use crate::abi::PublicCallStackItem;
use crate::field::FieldElement;

use super::report::{CallKindViolation, FailureCollector, KernelFailure};

/// Structural preconditions for a call to run in the public kernel.
///
/// Every condition is checked; each violated one is reported separately.
pub fn validate_inputs(
    item: &PublicCallStackItem,
    bytecode_hash: &FieldElement,
    collector: &mut FailureCollector,
) {
    let call_context = &item.public_inputs.call_context;
    let function_data = &item.function_data;

    collector.check(!call_context.is_contract_deployment, || {
        KernelFailure::InvalidCallKind(CallKindViolation::Deployment)
    });
    collector.check(!item.contract_address.is_zero(), || {
        KernelFailure::InvalidAddress
    });
    collector.check(!function_data.function_selector.is_zero(), || {
        KernelFailure::InvalidSelector
    });
    collector.check(!function_data.is_constructor, || {
        KernelFailure::InvalidCallKind(CallKindViolation::Constructor)
    });
    collector.check(!function_data.is_private, || {
        KernelFailure::InvalidCallKind(CallKindViolation::Private)
    });
    collector.check(!bytecode_hash.is_zero(), || KernelFailure::InvalidBytecodeHash);
}
