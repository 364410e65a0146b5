//! Goldilocks prime field element used for every kernel value.
//!
//! Storage slots, stored values, contract addresses, call-stack hashes and
//! tree nodes are all elements of this field. Only the operations the kernel
//! needs are provided: canonical construction, reduction of hash digests and
//! little-endian (de)serialization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Metadata describing the underlying field modulus.
#[derive(Debug, Clone, Copy)]
pub struct Modulus {
    /// Prime modulus value in canonical representation.
    pub value: u64,
    /// Indicates whether the modulus passed primality checks during configuration.
    pub is_prime: bool,
}

impl Modulus {
    /// Creates a new modulus descriptor.
    pub const fn new(value: u64, is_prime: bool) -> Self {
        Self { value, is_prime }
    }
}

/// Goldilocks modulus `2^64 - 2^32 + 1`.
pub const DEFAULT_MODULUS: Modulus = Modulus::new(0xffff_ffff_0000_0001, true);

/// Field element represented as a canonical value modulo the prime.
///
/// The wrapped integer is always within `[0, MODULUS.value)`. Constructors
/// reduce their input, deserialization rejects non-canonical encodings.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "CanonicalU64", into = "u64")]
pub struct FieldElement(u64);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl FieldElement {
    /// Canonical prime modulus associated with this field.
    pub const MODULUS: Modulus = DEFAULT_MODULUS;
    /// Additive identity in canonical form.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity in canonical form.
    pub const ONE: FieldElement = FieldElement(1);
    /// Size of the canonical byte encoding.
    pub const BYTE_LENGTH: usize = 8;

    /// Reduces an arbitrary `u64` into the field.
    pub const fn new(value: u64) -> Self {
        if value >= Self::MODULUS.value {
            Self(value - Self::MODULUS.value)
        } else {
            Self(value)
        }
    }

    /// Maps a 32-byte digest into the field by reducing its first eight
    /// little-endian bytes.
    ///
    /// Only 64 bits of the digest survive, so two unrelated inputs collide
    /// after roughly 2^32 hashes. See the `hash` module docs.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        Self::new(u64::from_le_bytes(word))
    }

    /// Accepts `value` only if it is already below the modulus.
    pub const fn checked(value: u64) -> Result<Self, FieldDeserializeError> {
        if value >= Self::MODULUS.value {
            return Err(FieldDeserializeError::FieldDeserializeNonCanonical);
        }
        Ok(Self(value))
    }

    /// Returns the canonical integer representative.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the additive identity.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

impl From<FieldElement> for u64 {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

/// Wire form of a field element; only canonical integers are accepted.
#[derive(Deserialize)]
#[serde(transparent)]
struct CanonicalU64(u64);

impl TryFrom<CanonicalU64> for FieldElement {
    type Error = FieldDeserializeError;

    fn try_from(raw: CanonicalU64) -> Result<Self, Self::Error> {
        Self::checked(raw.0)
    }
}

/// Errors raised while decoding field elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDeserializeError {
    /// The encoded integer was not below the modulus.
    FieldDeserializeNonCanonical,
}

impl fmt::Display for FieldDeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDeserializeError::FieldDeserializeNonCanonical => {
                write!(f, "field element deserialization failed: non-canonical input")
            }
        }
    }
}

impl std::error::Error for FieldDeserializeError {}

/// Trait defining serialization requirements for field elements.
pub trait CanonicalSerialize: Sized {
    /// Canonical serialization output type (e.g. `[u8; 8]`).
    type Bytes;

    /// Serializes the element into canonical little-endian bytes.
    fn to_bytes(&self) -> Self::Bytes;

    /// Attempts to deserialize from canonical little-endian bytes.
    fn from_bytes(bytes: &Self::Bytes) -> Result<Self, FieldDeserializeError>;
}

impl CanonicalSerialize for FieldElement {
    type Bytes = [u8; 8];

    fn to_bytes(&self) -> Self::Bytes {
        self.0.to_le_bytes()
    }

    fn from_bytes(bytes: &Self::Bytes) -> Result<Self, FieldDeserializeError> {
        Self::checked(u64::from_le_bytes(*bytes))
    }
}
