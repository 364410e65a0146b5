
use _fixtures::{
    child_item, continuation_step, contract, felt, first_step, limits, CallBuilder, SEEDED_TREE,
};
use proptest::prelude::*;
use public_kernel::abi::{PublicDataWrite, StateTransition};
use public_kernel::field::FieldElement;
use public_kernel::kernel::{leaf_index, leaf_value, update_outputs, OutputArray};
use public_kernel::{accumulate_step, run_step, CircuitOutputs, KernelFailure};

fn write(tag: u64) -> PublicDataWrite {
    PublicDataWrite {
        leaf_index: felt(tag),
        new_value: felt(tag + 1),
    }
}

fn filled(writes: usize, pending: usize) -> CircuitOutputs {
    let mut outputs = CircuitOutputs::empty(&limits());
    for tag in 0..writes {
        outputs
            .end
            .state_transitions
            .push(write(1000 + tag as u64))
            .expect("write capacity");
    }
    for tag in 0..pending {
        outputs
            .end
            .public_call_stack
            .push(felt(500 + tag as u64))
            .expect("stack capacity");
    }
    outputs
}

#[test]
fn full_write_set_rejects_the_step_atomically() {
    let limits = limits();
    let accumulator = filled(limits.kernel_state_transitions, 0);
    let call = CallBuilder::new(&SEEDED_TREE)
        .transition(5, 7, 9)
        .nested(Some(child_item(1)))
        .build();

    let result = accumulate_step(&first_step(call.clone()), &accumulator);
    assert_eq!(
        result,
        Err(KernelFailure::CapacityExceeded {
            target: OutputArray::StateTransitions,
            capacity: limits.kernel_state_transitions,
            required: limits.kernel_state_transitions + 1,
        })
    );

    let mut in_place = accumulator.clone();
    in_place.is_private = true;
    let before = in_place.clone();
    assert!(update_outputs(&call, &mut in_place).is_err());
    assert_eq!(in_place, before, "rejected step must leave no partial effects");
}

#[test]
fn full_call_stack_rejects_before_writes() {
    let limits = limits();
    let accumulator = filled(0, limits.kernel_public_call_stack - 1);
    let call = CallBuilder::new(&SEEDED_TREE)
        .transition(5, 7, 9)
        .nested(Some(child_item(1)))
        .nested(None)
        .build();

    let mut in_place = accumulator.clone();
    let err = update_outputs(&call, &mut in_place).unwrap_err();
    assert!(matches!(
        err,
        KernelFailure::CapacityExceeded {
            target: OutputArray::PublicCallStack,
            ..
        }
    ));
    assert_eq!(in_place, accumulator);
}

#[test]
fn overflow_is_fatal_in_the_step_report() {
    let mut call = CallBuilder::new(&SEEDED_TREE).transition(5, 7, 9).build();
    call.call_stack_item
        .public_inputs
        .state_transitions
        .push(StateTransition::new(felt(6), felt(0), felt(1)))
        .expect("transition capacity");
    call.state_transitions_sibling_paths
        .push(SEEDED_TREE.witness(&leaf_index(&contract(), &felt(6))));

    let limits = limits();
    let mut previous = filled(limits.kernel_state_transitions - 1, 0);
    previous
        .end
        .public_call_stack
        .push(call.call_stack_item.hash())
        .expect("stack capacity");
    let report = run_step(&continuation_step(previous, call), &limits);
    assert!(report.has_fatal());
    assert!(report.outputs.is_none());
    assert_eq!(
        report.failures,
        vec![KernelFailure::CapacityExceeded {
            target: OutputArray::StateTransitions,
            capacity: limits.kernel_state_transitions,
            required: limits.kernel_state_transitions + 1,
        }]
    );
}

#[test]
fn sentinels_are_kept_in_the_stack_and_skipped_in_writes() {
    let mut call = CallBuilder::new(&SEEDED_TREE)
        .nested(None)
        .nested(Some(child_item(2)))
        .nested(None)
        .build();
    let transitions = &mut call.call_stack_item.public_inputs.state_transitions;
    transitions.push(StateTransition::default()).expect("fits");
    transitions
        .push(StateTransition::new(felt(8), felt(0), felt(3)))
        .expect("fits");
    transitions.push(StateTransition::default()).expect("fits");

    let outputs =
        accumulate_step(&first_step(call), &CircuitOutputs::empty(&limits())).expect("fits");
    assert_eq!(
        outputs.end.public_call_stack.as_slice(),
        &[FieldElement::ZERO, child_item(2).hash(), FieldElement::ZERO]
    );
    assert_eq!(
        outputs.end.state_transitions.as_slice(),
        &[PublicDataWrite {
            leaf_index: leaf_index(&contract(), &felt(8)),
            new_value: leaf_value(&felt(3)),
        }]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn previous_entries_form_a_prefix(
        prior_writes in 0usize..8,
        prior_pending in 0usize..4,
        slots in proptest::collection::vec(1u64..10_000, 0..4),
        nested in proptest::collection::vec(proptest::option::of(1u64..100), 0..4),
    ) {
        let accumulator = filled(prior_writes, prior_pending);
        let mut builder = CallBuilder::new(&SEEDED_TREE);
        for &slot in &slots {
            builder = builder.transition(slot, 0, slot + 1);
        }
        for tag in &nested {
            builder = builder.nested(tag.map(child_item));
        }
        let call = builder.build();

        let outputs = accumulate_step(&first_step(call.clone()), &accumulator).expect("fits");

        let writes = outputs.end.state_transitions.as_slice();
        prop_assert_eq!(&writes[..prior_writes], accumulator.end.state_transitions.as_slice());
        let expected: Vec<_> = slots
            .iter()
            .map(|&slot| PublicDataWrite {
                leaf_index: leaf_index(&contract(), &felt(slot)),
                new_value: leaf_value(&felt(slot + 1)),
            })
            .collect();
        prop_assert_eq!(&writes[prior_writes..], expected.as_slice());

        let pending = outputs.end.public_call_stack.as_slice();
        prop_assert_eq!(&pending[..prior_pending], accumulator.end.public_call_stack.as_slice());
        prop_assert_eq!(
            &pending[prior_pending..],
            call.call_stack_item.public_inputs.public_call_stack.as_slice()
        );
    }
}
