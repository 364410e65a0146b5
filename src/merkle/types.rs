use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PUBLIC_DATA_TREE_HEIGHT;
use crate::field::FieldElement;

/// Ordered sibling hashes from the leaf level up to the child of the root.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiblingPath {
    siblings: Vec<FieldElement>,
}

impl SiblingPath {
    /// Wraps the provided siblings without checking their count.
    pub fn new(siblings: Vec<FieldElement>) -> Self {
        Self { siblings }
    }

    /// Path of the expected height where every sibling is zero.
    pub fn zeroed() -> Self {
        Self {
            siblings: vec![FieldElement::ZERO; PUBLIC_DATA_TREE_HEIGHT],
        }
    }

    /// Number of siblings carried by the path.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Returns `true` when the path carries no siblings.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Returns the siblings ordered from leaf to root.
    pub fn siblings(&self) -> &[FieldElement] {
        &self.siblings
    }

    /// Mutable access to the siblings.
    pub fn siblings_mut(&mut self) -> &mut [FieldElement] {
        &mut self.siblings
    }
}

/// Membership witness for one leaf of the public data tree.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembershipWitness {
    pub sibling_path: SiblingPath,
}

impl MembershipWitness {
    pub fn new(sibling_path: SiblingPath) -> Self {
        Self { sibling_path }
    }
}

/// Errors emitted by the Merkle layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    /// The sibling path does not match the tree height.
    InvalidPathLength { expected: usize, got: usize },
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::InvalidPathLength { expected, got } => {
                write!(f, "invalid path length: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for MerkleError {}
