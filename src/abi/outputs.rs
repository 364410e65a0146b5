use serde::{Deserialize, Serialize};

use crate::config::KernelLimits;
use crate::field::FieldElement;
use crate::utils::BoundedVec;

use super::state::PublicDataWrite;

/// Historic roots the aggregate is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoricTreeRoots {
    pub public_data_tree_root: FieldElement,
}

/// Values that stay constant across a chain of kernel steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstantData {
    pub historic_tree_roots: HistoricTreeRoots,
}

/// Running aggregate of pending calls and committed writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatedData {
    pub public_call_stack: BoundedVec<FieldElement>,
    pub state_transitions: BoundedVec<PublicDataWrite>,
}

/// Accumulator handed from one kernel step to the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitOutputs {
    pub end: AccumulatedData,
    pub constants: ConstantData,
    pub is_private: bool,
}

impl CircuitOutputs {
    /// Empty accumulator sized by `limits`.
    pub fn empty(limits: &KernelLimits) -> Self {
        Self {
            end: AccumulatedData {
                public_call_stack: BoundedVec::new(limits.kernel_public_call_stack),
                state_transitions: BoundedVec::new(limits.kernel_state_transitions),
            },
            constants: ConstantData::default(),
            is_private: false,
        }
    }
}
