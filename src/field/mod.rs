//! Field arithmetic primitives for the public kernel.

pub mod prime_field;

pub use prime_field::{CanonicalSerialize, FieldDeserializeError, FieldElement};
