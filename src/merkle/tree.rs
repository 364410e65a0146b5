use std::collections::HashMap;

use crate::config::PUBLIC_DATA_TREE_HEIGHT;
use crate::field::FieldElement;

use super::path::{empty_subtree_roots, hash_node};
use super::types::{MembershipWitness, SiblingPath};

/// Sparse in-memory public data tree.
///
/// Only nodes that differ from the empty-subtree ladder are stored, so a
/// height-64 tree costs `O(writes * height)` memory. The tree is a reference
/// implementation for producing membership witnesses and applying
/// accumulated writes; the kernel itself only ever sees roots and paths.
#[derive(Clone, Debug)]
pub struct PublicDataTree {
    levels: Vec<HashMap<u64, FieldElement>>,
    empty: Vec<FieldElement>,
}

impl Default for PublicDataTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicDataTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            levels: vec![HashMap::new(); PUBLIC_DATA_TREE_HEIGHT + 1],
            empty: empty_subtree_roots(),
        }
    }

    /// Current root digest.
    pub fn root(&self) -> FieldElement {
        self.node(PUBLIC_DATA_TREE_HEIGHT, 0)
    }

    /// Leaf value stored at `leaf_index` (zero when never written).
    pub fn get(&self, leaf_index: &FieldElement) -> FieldElement {
        self.node(0, leaf_index.as_u64())
    }

    /// Number of leaves that have been written at least once.
    pub fn written_leaves(&self) -> usize {
        self.levels[0].len()
    }

    /// Writes `leaf_value` at `leaf_index` and refreshes the path to the root.
    pub fn update(&mut self, leaf_index: &FieldElement, leaf_value: FieldElement) {
        let mut position = leaf_index.as_u64();
        self.levels[0].insert(position, leaf_value);
        for level in 0..PUBLIC_DATA_TREE_HEIGHT {
            let left = self.node(level, position & !1);
            let right = self.node(level, position | 1);
            position >>= 1;
            self.levels[level + 1].insert(position, hash_node(&left, &right));
        }
    }

    /// Applies writes in order; later writes to the same index win.
    pub fn apply_writes<'a, I>(&mut self, writes: I)
    where
        I: IntoIterator<Item = (&'a FieldElement, &'a FieldElement)>,
    {
        for (leaf_index, leaf_value) in writes {
            self.update(leaf_index, *leaf_value);
        }
    }

    /// Sibling path for `leaf_index` against the current root.
    pub fn sibling_path(&self, leaf_index: &FieldElement) -> SiblingPath {
        let mut position = leaf_index.as_u64();
        let mut siblings = Vec::with_capacity(PUBLIC_DATA_TREE_HEIGHT);
        for level in 0..PUBLIC_DATA_TREE_HEIGHT {
            siblings.push(self.node(level, position ^ 1));
            position >>= 1;
        }
        SiblingPath::new(siblings)
    }

    /// Membership witness for `leaf_index` against the current root.
    pub fn witness(&self, leaf_index: &FieldElement) -> MembershipWitness {
        MembershipWitness::new(self.sibling_path(leaf_index))
    }

    fn node(&self, level: usize, position: u64) -> FieldElement {
        self.levels[level]
            .get(&position)
            .copied()
            .unwrap_or(self.empty[level])
    }
}
