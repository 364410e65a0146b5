//! Public data tree addressing.

use crate::abi::ContractAddress;
use crate::field::FieldElement;
use crate::hash::{hash_fields, PUBLIC_DATA_INDEX_DOMAIN_TAG, PUBLIC_DATA_VALUE_DOMAIN_TAG};

/// Leaf index of `storage_slot` in the storage of `contract_address`.
pub fn leaf_index(contract_address: &ContractAddress, storage_slot: &FieldElement) -> FieldElement {
    hash_fields(
        PUBLIC_DATA_INDEX_DOMAIN_TAG,
        &[contract_address.to_field(), *storage_slot],
    )
}

/// Leaf value committing to a stored value.
///
/// Zero maps to the empty leaf so that never-written slots read back as zero.
pub fn leaf_value(value: &FieldElement) -> FieldElement {
    if value.is_zero() {
        return FieldElement::ZERO;
    }
    hash_fields(PUBLIC_DATA_VALUE_DOMAIN_TAG, &[*value])
}
