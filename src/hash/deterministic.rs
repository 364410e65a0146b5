use core::fmt;

use blake2::{Blake2s256, Digest};

use crate::field::FieldElement;

/// Deterministic 32-byte digest produced by the canonical Blake2s helper.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash {
    bytes: [u8; 32],
}

impl Hash {
    /// Constructs a hash value from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation of the digest.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Reduces the digest into a field element.
    pub fn to_field(&self) -> FieldElement {
        FieldElement::from_digest(&self.bytes)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x")?;
        for byte in self.bytes.iter() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Streaming Blake2s-256 hasher.
#[derive(Clone)]
pub struct Hasher {
    state: Blake2s256,
}

impl Hasher {
    /// Creates a new hasher instance.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }

    /// Creates a hasher that has already absorbed a domain tag.
    pub fn with_domain(tag: &[u8]) -> Self {
        let mut hasher = Self::new();
        hasher.update(tag);
        hasher
    }

    /// Absorbs additional bytes into the hasher state.
    pub fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.state, bytes);
    }

    /// Absorbs the canonical little-endian encoding of a field element.
    pub fn update_field(&mut self, element: &FieldElement) {
        self.update(&element.as_u64().to_le_bytes());
    }

    /// Finalises the hasher and returns a 32-byte digest.
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(self.state.finalize().into())
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes a sequence of field elements under a domain tag and reduces the
/// digest back into the field.
pub fn hash_fields(domain: &[u8], inputs: &[FieldElement]) -> FieldElement {
    let mut hasher = Hasher::with_domain(domain);
    for input in inputs {
        hasher.update_field(input);
    }
    hasher.finalize().to_field()
}
