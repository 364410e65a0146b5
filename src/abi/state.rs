use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::ser::{write_felt, CanonicalEncode};
use crate::utils::Sentinel;

/// Claim that the store currently holds `current_value` at `storage_slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateRead {
    pub storage_slot: FieldElement,
    pub current_value: FieldElement,
}

impl StateRead {
    pub fn new(storage_slot: FieldElement, current_value: FieldElement) -> Self {
        Self {
            storage_slot,
            current_value,
        }
    }
}

impl Sentinel for StateRead {
    fn is_empty(&self) -> bool {
        self.storage_slot.is_zero() && self.current_value.is_zero()
    }
}

impl CanonicalEncode for StateRead {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_felt(out, &self.storage_slot);
        write_felt(out, &self.current_value);
    }
}

/// Claim that `storage_slot` held `old_value` before the call and holds
/// `new_value` after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateTransition {
    pub storage_slot: FieldElement,
    pub old_value: FieldElement,
    pub new_value: FieldElement,
}

impl StateTransition {
    pub fn new(storage_slot: FieldElement, old_value: FieldElement, new_value: FieldElement) -> Self {
        Self {
            storage_slot,
            old_value,
            new_value,
        }
    }
}

impl Sentinel for StateTransition {
    fn is_empty(&self) -> bool {
        self.storage_slot.is_zero() && self.old_value.is_zero() && self.new_value.is_zero()
    }
}

impl CanonicalEncode for StateTransition {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_felt(out, &self.storage_slot);
        write_felt(out, &self.old_value);
        write_felt(out, &self.new_value);
    }
}

/// Tree-ready encoding of a state transition's effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublicDataWrite {
    pub leaf_index: FieldElement,
    pub new_value: FieldElement,
}

impl Sentinel for PublicDataWrite {
    fn is_empty(&self) -> bool {
        self.leaf_index.is_zero() && self.new_value.is_zero()
    }
}
