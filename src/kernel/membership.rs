//! Membership checks of declared reads and transitions against the call's
//! public data tree snapshot.

use core::fmt;

use crate::abi::PublicCallData;
use crate::field::FieldElement;
use crate::merkle::{root_from_sibling_path, MembershipWitness, MerkleError, SiblingPath};

use super::encoding::{leaf_index, leaf_value};
use super::report::{FailureCollector, KernelFailure, MembershipContext, WitnessKind};

/// Outcome of a failed membership verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipError {
    /// The path reconstructs a different root.
    RootMismatch {
        expected_root: FieldElement,
        computed_root: FieldElement,
    },
    /// The path itself is unusable.
    Malformed(MerkleError),
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::RootMismatch {
                expected_root,
                computed_root,
            } => write!(
                f,
                "root mismatch: expected {}, computed {}",
                expected_root, computed_root
            ),
            MembershipError::Malformed(err) => write!(f, "malformed path: {}", err),
        }
    }
}

impl std::error::Error for MembershipError {}

impl From<MerkleError> for MembershipError {
    fn from(err: MerkleError) -> Self {
        MembershipError::Malformed(err)
    }
}

/// Checks that `leaf_value` sits at `leaf_index` under `claimed_root`.
pub fn verify(
    leaf_value: &FieldElement,
    leaf_index: &FieldElement,
    sibling_path: &SiblingPath,
    claimed_root: &FieldElement,
) -> Result<(), MembershipError> {
    let computed_root = root_from_sibling_path(leaf_value, leaf_index, sibling_path)?;
    if &computed_root != claimed_root {
        return Err(MembershipError::RootMismatch {
            expected_root: *claimed_root,
            computed_root,
        });
    }
    Ok(())
}

/// Runs [`verify`] and routes any failure into `collector`.
pub fn check_membership(
    collector: &mut FailureCollector,
    context: MembershipContext,
    index: usize,
    leaf_value: &FieldElement,
    leaf_index: &FieldElement,
    witness: Option<&MembershipWitness>,
    claimed_root: &FieldElement,
) {
    let kind = match context {
        MembershipContext::StateRead => WitnessKind::StateReadPath,
        MembershipContext::StateTransition => WitnessKind::StateTransitionPath,
    };
    let Some(witness) = witness else {
        collector.report(KernelFailure::MissingWitness { kind, index });
        return;
    };
    match verify(leaf_value, leaf_index, &witness.sibling_path, claimed_root) {
        Ok(()) => {}
        Err(MembershipError::RootMismatch {
            expected_root,
            computed_root,
        }) => collector.report(KernelFailure::MembershipMismatch {
            context,
            index,
            expected_root,
            computed_root,
        }),
        Err(MembershipError::Malformed(_)) => {
            collector.report(KernelFailure::MissingWitness { kind, index })
        }
    }
}

/// Every non-empty read must prove its current value against the snapshot.
pub fn validate_state_reads(call: &PublicCallData, collector: &mut FailureCollector) {
    let item = &call.call_stack_item;
    for (index, read) in item.public_inputs.state_reads.occupied() {
        check_membership(
            collector,
            MembershipContext::StateRead,
            index,
            &leaf_value(&read.current_value),
            &leaf_index(&item.contract_address, &read.storage_slot),
            call.state_reads_sibling_paths.get(index),
            &call.public_data_tree_root,
        );
    }
}

/// Every non-empty transition must prove its old value against the snapshot.
/// The new value is not a membership claim at this point.
pub fn validate_state_transitions(call: &PublicCallData, collector: &mut FailureCollector) {
    let item = &call.call_stack_item;
    for (index, transition) in item.public_inputs.state_transitions.occupied() {
        check_membership(
            collector,
            MembershipContext::StateTransition,
            index,
            &leaf_value(&transition.old_value),
            &leaf_index(&item.contract_address, &transition.storage_slot),
            call.state_transitions_sibling_paths.get(index),
            &call.public_data_tree_root,
        );
    }
}
