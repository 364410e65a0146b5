use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::KernelLimits;
use crate::field::FieldElement;
use crate::hash::{Hasher, CALL_STACK_ITEM_DOMAIN_TAG};
use crate::ser::{write_bool, write_felt, write_u32, CanonicalEncode};
use crate::utils::BoundedVec;

use super::state::{StateRead, StateTransition};

/// Identifier of a deployed contract; zero denotes an unset address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(pub FieldElement);

impl ContractAddress {
    pub const ZERO: ContractAddress = ContractAddress(FieldElement::ZERO);

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_field(&self) -> FieldElement {
        self.0
    }
}

impl From<u64> for ContractAddress {
    fn from(value: u64) -> Self {
        Self(FieldElement::from(value))
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Four-byte function selector; zero denotes an invalid selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionSelector(pub u32);

impl FunctionSelector {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Function-level flags of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionData {
    pub function_selector: FunctionSelector,
    pub is_private: bool,
    pub is_constructor: bool,
}

impl CanonicalEncode for FunctionData {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_u32(out, self.function_selector.0);
        write_bool(out, self.is_private);
        write_bool(out, self.is_constructor);
    }
}

/// Execution context the call was made in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallContext {
    pub msg_sender: ContractAddress,
    pub storage_contract_address: ContractAddress,
    pub portal_contract_address: FieldElement,
    pub is_delegate_call: bool,
    pub is_static_call: bool,
    pub is_contract_deployment: bool,
}

impl CanonicalEncode for CallContext {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_felt(out, &self.msg_sender.0);
        write_felt(out, &self.storage_contract_address.0);
        write_felt(out, &self.portal_contract_address);
        write_bool(out, self.is_delegate_call);
        write_bool(out, self.is_static_call);
        write_bool(out, self.is_contract_deployment);
    }
}

/// Public inputs exposed by one public function execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCircuitPublicInputs {
    pub call_context: CallContext,
    pub args_hash: FieldElement,
    pub return_values: BoundedVec<FieldElement>,
    pub state_reads: BoundedVec<StateRead>,
    pub state_transitions: BoundedVec<StateTransition>,
    /// Hashes of nested public calls; zero marks an unused slot.
    pub public_call_stack: BoundedVec<FieldElement>,
    pub historic_public_data_tree_root: FieldElement,
}

impl PublicCircuitPublicInputs {
    /// Inputs with no reads, transitions, nested calls or return values.
    pub fn empty(limits: &KernelLimits) -> Self {
        Self {
            call_context: CallContext::default(),
            args_hash: FieldElement::ZERO,
            return_values: BoundedVec::new(limits.return_values),
            state_reads: BoundedVec::new(limits.state_reads),
            state_transitions: BoundedVec::new(limits.state_transitions),
            public_call_stack: BoundedVec::new(limits.public_call_stack),
            historic_public_data_tree_root: FieldElement::ZERO,
        }
    }
}

impl CanonicalEncode for PublicCircuitPublicInputs {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.call_context.encode_into(out);
        write_felt(out, &self.args_hash);
        self.return_values.encode_into(out);
        self.state_reads.encode_into(out);
        self.state_transitions.encode_into(out);
        self.public_call_stack.encode_into(out);
        write_felt(out, &self.historic_public_data_tree_root);
    }
}

/// Structured record of one public function invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCallStackItem {
    pub contract_address: ContractAddress,
    pub function_data: FunctionData,
    pub public_inputs: PublicCircuitPublicInputs,
}

impl PublicCallStackItem {
    /// Commitment over the full canonical encoding of the item.
    pub fn hash(&self) -> FieldElement {
        let mut hasher = Hasher::with_domain(CALL_STACK_ITEM_DOMAIN_TAG);
        hasher.update(&self.to_canonical_bytes());
        hasher.finalize().to_field()
    }
}

impl CanonicalEncode for PublicCallStackItem {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_felt(out, &self.contract_address.0);
        self.function_data.encode_into(out);
        self.public_inputs.encode_into(out);
    }
}
