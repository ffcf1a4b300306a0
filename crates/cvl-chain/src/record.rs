use cvl_crypto::CanonicalHasher;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ChainError;

/// Previous-hash sentinel carried by the genesis record.
pub const GENESIS_PREV_HASH: &str = "0000";

/// One unit in the chain, bound to its predecessor by a hash reference.
///
/// The stored hash is re-derived on every mutation path (construction, nonce
/// search, relink), so a record never carries a digest that is stale with
/// respect to its own fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub(crate) position: u64,
    pub(crate) payload: Value,
    pub(crate) prev_hash: String,
    pub(crate) nonce: u64,
    pub(crate) hash: String,
}

impl Record {
    /// Build a record and derive its hash immediately. The nonce starts at 0.
    ///
    /// Fails only if the payload cannot be canonicalized to JSON; a
    /// constructed record is always hashable.
    pub fn new<T: Serialize>(
        position: u64,
        payload: T,
        prev_hash: impl Into<String>,
    ) -> Result<Self, ChainError> {
        Self::with_nonce(position, payload, prev_hash, 0)
    }

    /// Build a record with an explicit starting nonce.
    pub fn with_nonce<T: Serialize>(
        position: u64,
        payload: T,
        prev_hash: impl Into<String>,
        nonce: u64,
    ) -> Result<Self, ChainError> {
        let payload =
            serde_json::to_value(payload).map_err(|e| ChainError::Serialization(e.to_string()))?;
        Ok(Self::from_value(position, payload, prev_hash.into(), nonce))
    }

    pub(crate) fn from_value(position: u64, payload: Value, prev_hash: String, nonce: u64) -> Self {
        let mut record = Self {
            position,
            payload,
            prev_hash,
            nonce,
            hash: String::new(),
        };
        record.hash = record.derive_hash();
        record
    }

    /// Digest of the canonical encoding of `(position, payload, prev_hash, nonce)`.
    ///
    /// Pure function of the four fields: two records with identical field
    /// values produce identical digests regardless of construction order.
    pub fn derive_hash(&self) -> String {
        let canonical = serde_json::json!({
            "position": self.position,
            "payload": self.payload,
            "prev_hash": self.prev_hash,
            "nonce": self.nonce,
        });
        CanonicalHasher::RECORD.hash_value(&canonical)
    }

    /// Brute-force the nonce until the hash starts with `target_prefix`.
    ///
    /// Resets the nonce to 0 and re-derives before the first check, so nonce
    /// 0 is never skipped and the empty prefix is accepted without a single
    /// increment. Unbounded by contract: a prefix outside the digest's hex
    /// alphabet never terminates. See
    /// [`search_nonce_bounded`](Self::search_nonce_bounded) for the
    /// caller-capped variant.
    pub fn search_nonce(&mut self, target_prefix: &str) {
        self.nonce = 0;
        self.hash = self.derive_hash();
        while !self.hash.starts_with(target_prefix) {
            self.nonce += 1;
            self.hash = self.derive_hash();
        }
        debug!(
            position = self.position,
            nonce = self.nonce,
            "nonce search finished"
        );
    }

    /// Capped nonce search: gives up after `max_iterations` increments.
    ///
    /// On success returns the found nonce. On exhaustion returns
    /// [`ChainError::SearchExhausted`], leaving the record self-consistent:
    /// the stored hash matches the last tried nonce.
    pub fn search_nonce_bounded(
        &mut self,
        target_prefix: &str,
        max_iterations: u64,
    ) -> Result<u64, ChainError> {
        self.nonce = 0;
        self.hash = self.derive_hash();
        while !self.hash.starts_with(target_prefix) {
            if self.nonce >= max_iterations {
                return Err(ChainError::SearchExhausted {
                    target_prefix: target_prefix.to_owned(),
                    max_iterations,
                });
            }
            self.nonce += 1;
            self.hash = self.derive_hash();
        }
        debug!(
            position = self.position,
            nonce = self.nonce,
            "nonce search finished"
        );
        Ok(self.nonce)
    }

    /// Recompute the hash from the current fields without touching the nonce.
    ///
    /// Reads the record's own `prev_hash` field only; it does not re-read the
    /// predecessor's current hash. Chain-wide propagation after a correction
    /// is orchestrated by [`Chain::find_and_correct`](crate::Chain::find_and_correct).
    pub fn refresh_hash(&mut self) {
        self.hash = self.derive_hash();
    }

    pub(crate) fn set_prev_hash(&mut self, prev_hash: String) {
        self.prev_hash = prev_hash;
    }

    /// 1-based sequence index within the chain.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// User data carried by the record.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Hash of the predecessor at link time (`"0000"` for genesis).
    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    /// Current correction value.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Stored digest of the record's fields.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn derive_hash_is_deterministic_for_any_payload(payload in ".*") {
            let a = Record::new(1, payload.as_str(), GENESIS_PREV_HASH).unwrap();
            let b = Record::new(1, payload.as_str(), GENESIS_PREV_HASH).unwrap();
            prop_assert_eq!(a.hash(), b.hash());
            prop_assert_eq!(a.hash().len(), 64);
        }

        #[test]
        fn single_char_prefix_search_terminates_with_match(
            payload in ".*",
            prefix in "[0-9a-f]",
        ) {
            let mut r = Record::new(1, payload.as_str(), GENESIS_PREV_HASH).unwrap();
            // ~16 expected attempts; the cap only bounds the test.
            r.search_nonce_bounded(&prefix, 100_000).unwrap();
            prop_assert!(r.hash().starts_with(&prefix));
            prop_assert_eq!(r.hash(), &r.derive_hash());
        }
    }
}
