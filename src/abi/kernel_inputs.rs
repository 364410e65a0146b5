use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::merkle::MembershipWitness;

use super::call_stack::PublicCallStackItem;
use super::outputs::CircuitOutputs;

/// Everything the kernel needs to check one public call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCallData {
    pub call_stack_item: PublicCallStackItem,
    /// Full items whose hashes must match `public_call_stack`, index by index.
    pub public_call_stack_preimages: Vec<PublicCallStackItem>,
    pub bytecode_hash: FieldElement,
    /// Snapshot every membership witness of this call is checked against.
    pub public_data_tree_root: FieldElement,
    pub state_reads_sibling_paths: Vec<MembershipWitness>,
    pub state_transitions_sibling_paths: Vec<MembershipWitness>,
}

/// Aggregate produced by the previous kernel step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousKernelData {
    pub public_inputs: CircuitOutputs,
}

/// Input of the first kernel step of a transaction's public phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKernelInputsNoPreviousKernel {
    pub public_call: PublicCallData,
}

/// Input of every later kernel step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKernelInputs {
    pub previous_kernel: PreviousKernelData,
    pub public_call: PublicCallData,
}

/// Kernel step input, polymorphic over whether an aggregate already exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelInput {
    FirstStep(PublicKernelInputsNoPreviousKernel),
    ContinuationStep(PublicKernelInputs),
}

impl KernelInput {
    /// Call checked and folded by this step.
    pub fn public_call(&self) -> &PublicCallData {
        match self {
            KernelInput::FirstStep(inputs) => &inputs.public_call,
            KernelInput::ContinuationStep(inputs) => &inputs.public_call,
        }
    }

    /// Aggregate inherited from the previous step, if any.
    pub fn previous_outputs(&self) -> Option<&CircuitOutputs> {
        match self {
            KernelInput::FirstStep(_) => None,
            KernelInput::ContinuationStep(inputs) => Some(&inputs.previous_kernel.public_inputs),
        }
    }
}

impl From<PublicKernelInputsNoPreviousKernel> for KernelInput {
    fn from(inputs: PublicKernelInputsNoPreviousKernel) -> Self {
        KernelInput::FirstStep(inputs)
    }
}

impl From<PublicKernelInputs> for KernelInput {
    fn from(inputs: PublicKernelInputs) -> Self {
        KernelInput::ContinuationStep(inputs)
    }
}
