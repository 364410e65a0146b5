use crate::config::PUBLIC_DATA_TREE_HEIGHT;
use crate::field::FieldElement;
use crate::hash::{hash_fields, MERKLE_NODE_DOMAIN_TAG};

use super::types::{MerkleError, SiblingPath};

/// Hashes two child nodes into their parent.
pub fn hash_node(left: &FieldElement, right: &FieldElement) -> FieldElement {
    hash_fields(MERKLE_NODE_DOMAIN_TAG, &[*left, *right])
}

/// Roots of empty subtrees, indexed by height (`0` is the empty leaf).
pub fn empty_subtree_roots() -> Vec<FieldElement> {
    let mut ladder = Vec::with_capacity(PUBLIC_DATA_TREE_HEIGHT + 1);
    let mut current = FieldElement::ZERO;
    ladder.push(current);
    for _ in 0..PUBLIC_DATA_TREE_HEIGHT {
        current = hash_node(&current, &current);
        ladder.push(current);
    }
    ladder
}

/// Recomputes the tree root from a leaf and its sibling path.
///
/// Bit `level` of `leaf_index` selects whether the running node is the right
/// (`1`) or left (`0`) child at that level.
pub fn root_from_sibling_path(
    leaf_value: &FieldElement,
    leaf_index: &FieldElement,
    path: &SiblingPath,
) -> Result<FieldElement, MerkleError> {
    if path.len() != PUBLIC_DATA_TREE_HEIGHT {
        return Err(MerkleError::InvalidPathLength {
            expected: PUBLIC_DATA_TREE_HEIGHT,
            got: path.len(),
        });
    }

    let mut node = *leaf_value;
    let mut position = leaf_index.as_u64();
    for sibling in path.siblings() {
        node = if position & 1 == 0 {
            hash_node(&node, sibling)
        } else {
            hash_node(sibling, &node)
        };
        position >>= 1;
    }
    Ok(node)
}
