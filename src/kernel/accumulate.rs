//! Folding one call's nested calls and tree writes into the aggregate.

use crate::abi::{CircuitOutputs, PublicCallData, PublicDataWrite};
use crate::utils::CapacityError;

use super::encoding::{leaf_index, leaf_value};
use super::report::{KernelFailure, OutputArray};

fn capacity_exceeded(target: OutputArray) -> impl Fn(CapacityError) -> KernelFailure {
    move |err| KernelFailure::CapacityExceeded {
        target,
        capacity: err.capacity,
        required: err.required,
    }
}

/// Folds the call's nested calls and writes into `outputs`.
///
/// Both capacity checks run before anything is written: on error `outputs`
/// is left exactly as it was.
pub fn update_outputs(
    call: &PublicCallData,
    outputs: &mut CircuitOutputs,
) -> Result<(), KernelFailure> {
    let item = &call.call_stack_item;
    let stack = &item.public_inputs.public_call_stack;
    let writes: Vec<PublicDataWrite> = item
        .public_inputs
        .state_transitions
        .occupied()
        .map(|(_, transition)| PublicDataWrite {
            leaf_index: leaf_index(&item.contract_address, &transition.storage_slot),
            new_value: leaf_value(&transition.new_value),
        })
        .collect();

    outputs
        .end
        .public_call_stack
        .ensure_room(stack.len())
        .map_err(capacity_exceeded(OutputArray::PublicCallStack))?;
    outputs
        .end
        .state_transitions
        .ensure_room(writes.len())
        .map_err(capacity_exceeded(OutputArray::StateTransitions))?;

    outputs.is_private = false;
    outputs.constants.historic_tree_roots.public_data_tree_root =
        item.public_inputs.historic_public_data_tree_root;
    outputs
        .end
        .public_call_stack
        .extend_from_slice(stack.as_slice())
        .map_err(capacity_exceeded(OutputArray::PublicCallStack))?;
    outputs
        .end
        .state_transitions
        .extend_from_slice(&writes)
        .map_err(capacity_exceeded(OutputArray::StateTransitions))?;
    Ok(())
}
