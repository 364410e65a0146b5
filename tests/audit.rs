
use _fixtures::{
    child_item, continuation_step, felt, first_step, limits, pending, CallBuilder, SEEDED_TREE,
    VALID_CALL,
};
use public_kernel::utils::set_parallelism;
use public_kernel::{audit_steps, run_step, KernelInput};

fn recorded_steps() -> Vec<KernelInput> {
    let mut steps = Vec::new();
    for slot in 1..=6u64 {
        let call = CallBuilder::new(&SEEDED_TREE)
            .read(slot, 0)
            .transition(slot + 10, 0, slot)
            .nested(Some(child_item(slot)))
            .build();
        steps.push(first_step(call));
    }
    let mut broken = VALID_CALL.clone();
    broken.bytecode_hash = felt(0);
    steps.push(first_step(broken));
    steps.push(continuation_step(pending(&[felt(77)]), VALID_CALL.clone()));
    steps
}

#[test]
fn reports_follow_input_order() {
    let steps = recorded_steps();
    let reports = audit_steps(&steps, &limits());
    assert_eq!(reports.len(), steps.len());
    for (step, report) in steps.iter().zip(&reports) {
        assert_eq!(report, &run_step(step, &limits()));
    }
    let valid: Vec<_> = reports.iter().map(|report| report.is_valid()).collect();
    // Slots 1, 2 and 5 are seeded with non-zero values, so reading zero fails.
    assert_eq!(valid, [false, false, true, true, false, true, false, false]);
}

#[test]
fn sequential_and_parallel_audits_agree() {
    let steps = recorded_steps();
    let baseline = {
        let _guard = set_parallelism(false);
        audit_steps(&steps, &limits())
    };
    let parallel = {
        let _guard = set_parallelism(true);
        audit_steps(&steps, &limits())
    };
    assert_eq!(baseline, parallel);
}
