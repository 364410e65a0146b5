//! Canonical byte encoding used for hashing kernel structures.
//!
//! Layout rules:
//!
//! * integers and field elements are little-endian;
//! * booleans occupy a single byte (`0` or `1`);
//! * sequences carry a `u64` item-count prefix followed by the items.
//!
//! The encoding is write-only: it exists so that every party derives the same
//! call-stack item hash, not as a transport format (the ABI types use serde
//! for that).

use crate::field::{CanonicalSerialize, FieldElement};
use crate::utils::BoundedVec;

/// Types with a canonical byte encoding.
pub trait CanonicalEncode {
    /// Appends the canonical encoding of `self` to `out`.
    fn encode_into(&self, out: &mut Vec<u8>);

    /// Returns the canonical encoding as a fresh buffer.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }
}

/// Encodes a `u8` into the output buffer.
pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u64` in little-endian order.
pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    write_u8(out, value as u8);
}

/// Writes a field element in canonical little-endian order.
pub fn write_felt(out: &mut Vec<u8>, value: &FieldElement) {
    out.extend_from_slice(&value.to_bytes());
}

/// Writes a sequence with a `u64` item-count prefix.
pub fn write_seq<'a, T, I>(out: &mut Vec<u8>, items: I)
where
    T: CanonicalEncode + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    write_u64(out, items.len() as u64);
    for item in items {
        item.encode_into(out);
    }
}

impl CanonicalEncode for FieldElement {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_felt(out, self);
    }
}

// Capacity is a profile setting, not content; only stored entries are hashed.
impl<T: CanonicalEncode> CanonicalEncode for BoundedVec<T> {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_seq(out, self.iter());
    }
}
