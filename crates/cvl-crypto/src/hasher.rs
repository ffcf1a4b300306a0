use serde::Serialize;

/// Domain-separated BLAKE3 content hasher producing lowercase hex digests.
///
/// Each hasher carries a domain tag (e.g., `"cvl-record-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: two values with identical canonical bytes hashed under
/// different domains produce different digests.
pub struct CanonicalHasher {
    domain: &'static str,
}

impl CanonicalHasher {
    /// Hasher for ledger records.
    pub const RECORD: Self = Self {
        domain: "cvl-record-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation. Returns 64 lowercase hex chars.
    pub fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        hex::encode(hasher.finalize().as_bytes())
    }

    /// Hash a JSON value in canonical form.
    ///
    /// Canonical form is the compact JSON encoding with object keys in sorted
    /// order; `serde_json`'s default `Map` is BTreeMap-backed, so sorting
    /// falls out of the encoding itself. Semantically identical values always
    /// hash identically regardless of construction order.
    pub fn hash_value(&self, value: &serde_json::Value) -> String {
        self.hash_bytes(value.to_string().as_bytes())
    }

    /// Canonicalize an arbitrary serializable value, then hash it.
    pub fn hash_json<T: Serialize>(&self, value: &T) -> Result<String, HasherError> {
        let value =
            serde_json::to_value(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash_value(&value))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &str) -> bool {
        self.hash_bytes(data) == expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
