//! Hashing primitives for the public kernel.
//!
//! Every commitment in the crate goes through a single Blake2s-256 helper.
//! Digests are reduced into the Goldilocks field so that leaf indices, leaf
//! values, tree nodes and call-stack hashes all live in one domain. Each use
//! site prepends a fixed ASCII domain tag so the encodings cannot collide
//! across roles.
//!
//! # Security bound
//!
//! Reduction keeps only the low 64 bits of each digest, so the outputs are
//! collision resistant to about 2^32 work (birthday bound), not 2^128. That
//! is enough for checking recorded steps locally but not for adversarial
//! settings. Deployments that need the full bound must swap [`hash_fields`]
//! for the host system's native field hash; every caller goes through it.

mod deterministic;

pub use deterministic::{hash_fields, Hash, Hasher};

/// Domain tag for the (contract, slot) to leaf index encoding.
pub const PUBLIC_DATA_INDEX_DOMAIN_TAG: &[u8; 20] = b"PK-PUBLIC-DATA-INDEX";

/// Domain tag for the stored value to leaf value encoding.
pub const PUBLIC_DATA_VALUE_DOMAIN_TAG: &[u8; 20] = b"PK-PUBLIC-DATA-VALUE";

/// Domain tag for internal nodes of the public data tree.
pub const MERKLE_NODE_DOMAIN_TAG: &[u8; 14] = b"PK-MERKLE-NODE";

/// Domain tag for public call stack item hashing.
pub const CALL_STACK_ITEM_DOMAIN_TAG: &[u8; 18] = b"PK-CALL-STACK-ITEM";
