//! Data contracts exchanged between the execution stage and the kernel.
//!
//! All structures are plain data: they are produced by an upstream witness
//! generator, consumed immutably by the validators and (for
//! [`CircuitOutputs`]) extended by the accumulator. Fixed-capacity arrays use
//! [`BoundedVec`](crate::utils::BoundedVec); sentinel entries are recognised
//! through [`Sentinel`](crate::utils::Sentinel).

mod call_stack;
mod kernel_inputs;
mod outputs;
mod state;

pub use call_stack::{
    CallContext, ContractAddress, FunctionData, FunctionSelector, PublicCallStackItem,
    PublicCircuitPublicInputs,
};
pub use kernel_inputs::{
    KernelInput, PreviousKernelData, PublicCallData, PublicKernelInputs,
    PublicKernelInputsNoPreviousKernel,
};
pub use outputs::{AccumulatedData, CircuitOutputs, ConstantData, HistoricTreeRoots};
pub use state::{PublicDataWrite, StateRead, StateTransition};
