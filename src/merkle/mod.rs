//! Public data tree commitment layer.
//!
//! The tree is a binary sparse Merkle tree of height
//! [`PUBLIC_DATA_TREE_HEIGHT`](crate::config::PUBLIC_DATA_TREE_HEIGHT):
//!
//! * **Leaf position:** the 64-bit integer value of the leaf index; bit `i`
//!   picks the child side at level `i`.
//! * **Empty leaves:** the zero element. Empty subtrees hash up the ladder
//!   returned by [`empty_subtree_roots`].
//! * **Internal nodes:** `hash_fields(PK-MERKLE-NODE, [left, right])`.
//! * **Paths:** exactly one sibling per level, ordered leaf to root.

mod path;
mod tree;
mod types;

pub use path::{empty_subtree_roots, hash_node, root_from_sibling_path};
pub use tree::PublicDataTree;
pub use types::{MembershipWitness, MerkleError, SiblingPath};
