
use _fixtures::{felt, VALID_CALL};
use insta::assert_snapshot;
use public_kernel::abi::{ContractAddress, FunctionSelector};
use public_kernel::field::FieldElement;
use public_kernel::kernel::{validate_inputs, OutputArray, WitnessKind};
use public_kernel::{FailureCollector, KernelFailure, Severity};

fn render(failures: &[KernelFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{:?} {}: {}", failure.severity(), failure.kind_name(), failure))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn valid_call_passes() {
    let call = &*VALID_CALL;
    let mut collector = FailureCollector::new();
    validate_inputs(&call.call_stack_item, &call.bytecode_hash, &mut collector);
    assert!(collector.is_empty());
}

#[test]
fn every_violation_is_reported_in_order() {
    let mut item = VALID_CALL.call_stack_item.clone();
    item.public_inputs.call_context.is_contract_deployment = true;
    item.contract_address = ContractAddress::ZERO;
    item.function_data.function_selector = FunctionSelector(0);
    item.function_data.is_constructor = true;
    item.function_data.is_private = true;

    let mut collector = FailureCollector::new();
    validate_inputs(&item, &FieldElement::ZERO, &mut collector);
    assert_snapshot!(render(collector.failures()), @r###"
    Claim InvalidCallKind: invalid call kind: deployment not allowed
    Claim InvalidAddress: contract address must be valid
    Claim InvalidSelector: function selector must be valid
    Claim InvalidCallKind: invalid call kind: constructor not allowed
    Claim InvalidCallKind: invalid call kind: private call not allowed in public kernel
    Claim InvalidBytecodeHash: bytecode hash must be valid
    "###);
}

#[test]
fn single_flags_are_independent() {
    let mut item = VALID_CALL.call_stack_item.clone();
    item.function_data.is_private = true;
    let mut collector = FailureCollector::new();
    validate_inputs(&item, &felt(1), &mut collector);
    assert_eq!(collector.len(), 1);

    let item = VALID_CALL.call_stack_item.clone();
    let mut collector = FailureCollector::new();
    validate_inputs(&item, &FieldElement::ZERO, &mut collector);
    assert_eq!(collector.failures(), &[KernelFailure::InvalidBytecodeHash]);
}

#[test]
fn structural_and_fatal_failures_render() {
    let failures = [
        KernelFailure::MissingWitness {
            kind: WitnessKind::CallStackPreimage,
            index: 2,
        },
        KernelFailure::EmptyPendingCallStack,
        KernelFailure::CapacityExceeded {
            target: OutputArray::StateTransitions,
            capacity: 16,
            required: 17,
        },
    ];
    assert_snapshot!(render(&failures), @r###"
    Structural MissingWitness: public_call_stack_preimages[2]: witness missing or malformed
    Structural EmptyPendingCallStack: previous kernel has no pending public call
    Fatal CapacityExceeded: end.state_transitions capacity exceeded: capacity 16, required 17
    "###);
    assert!(failures
        .iter()
        .any(|failure| failure.severity() == Severity::Fatal));
}
