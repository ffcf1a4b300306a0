use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ChainError;
use crate::record::{Record, GENESIS_PREV_HASH};

/// Payload carried by the genesis record.
const GENESIS_PAYLOAD: &str = "Initial Block";

/// Ordered, append-only sequence of hash-linked records.
///
/// The chain exclusively owns its records: callers read through shared
/// references and mutate only through the chain's operations. Records are
/// never removed or reordered; a correction mutates one record's nonce in
/// place and then relinks everything after it, front-to-back.
#[derive(Clone, Debug)]
pub struct Chain {
    records: Vec<Record>,
}

impl Chain {
    /// Create a chain holding only the genesis record
    /// (position 1, payload `"Initial Block"`, previous hash `"0000"`).
    pub fn new() -> Self {
        let genesis = Record::from_value(
            1,
            Value::from(GENESIS_PAYLOAD),
            GENESIS_PREV_HASH.to_owned(),
            0,
        );
        Self {
            records: vec![genesis],
        }
    }

    /// Append a new record carrying `payload` at the tail.
    ///
    /// The new record's position is `len + 1`, its previous hash is the
    /// current tail's hash, and its nonce starts at 0. The only failure is a
    /// payload that cannot be canonicalized.
    pub fn append<T: Serialize>(&mut self, payload: T) -> Result<&Record, ChainError> {
        let position = self.records.len() as u64 + 1;
        let prev_hash = self.tail().hash().to_owned();
        let record = Record::new(position, payload, prev_hash)?;
        debug!(position, hash = %record.hash(), "record appended");
        self.records.push(record);
        Ok(self.tail())
    }

    /// Search the nonce of the record at 1-based `position` until its hash
    /// starts with `target_prefix`, then relink every downstream record.
    ///
    /// The relink runs strictly front-to-back: each downstream record's
    /// previous hash is rewritten from its predecessor's already-updated hash
    /// before its own hash is refreshed. Afterwards the chain is valid again.
    pub fn find_and_correct(
        &mut self,
        target_prefix: &str,
        position: u64,
    ) -> Result<(), ChainError> {
        let index = self.index_of(position)?;
        debug!(position, prefix = %target_prefix, "correcting record");
        self.records[index].search_nonce(target_prefix);
        self.relink_after(index);
        Ok(())
    }

    /// [`find_and_correct`](Self::find_and_correct) with a caller-supplied
    /// iteration cap.
    ///
    /// On [`ChainError::SearchExhausted`] the downstream relink still runs,
    /// so the chain stays valid with the record at its last tried nonce.
    pub fn find_and_correct_bounded(
        &mut self,
        target_prefix: &str,
        position: u64,
        max_iterations: u64,
    ) -> Result<(), ChainError> {
        let index = self.index_of(position)?;
        debug!(position, prefix = %target_prefix, max_iterations, "correcting record");
        let searched = self.records[index].search_nonce_bounded(target_prefix, max_iterations);
        self.relink_after(index);
        searched.map(|_| ())
    }

    /// Scan the chain front-to-back for integrity violations.
    ///
    /// Returns `false` on the first record whose stored hash does not match a
    /// fresh derivation of its own fields, or whose previous-hash link does
    /// not match its predecessor's stored hash. The genesis record is never
    /// itself checked against a predecessor; it only anchors the second
    /// record's link check. Corruption is reported, never raised.
    pub fn is_valid(&self) -> bool {
        for i in 1..self.records.len() {
            let current = &self.records[i];
            if current.hash() != current.derive_hash() {
                return false;
            }
            if current.prev_hash() != self.records[i - 1].hash() {
                return false;
            }
        }
        true
    }

    /// All records in chain order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records in the chain (always at least 1).
    pub fn len(&self) -> u64 {
        self.records.len() as u64
    }

    /// A chain is never empty; it always holds its genesis record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at 1-based `position`, if any.
    pub fn get(&self, position: u64) -> Option<&Record> {
        if position == 0 {
            return None;
        }
        self.records.get((position - 1) as usize)
    }

    /// The most recently appended record.
    pub fn tail(&self) -> &Record {
        // A chain always holds at least the genesis record.
        &self.records[self.records.len() - 1]
    }

    fn index_of(&self, position: u64) -> Result<usize, ChainError> {
        if position == 0 || position > self.records.len() as u64 {
            return Err(ChainError::PositionOutOfRange {
                position,
                len: self.records.len() as u64,
            });
        }
        Ok((position - 1) as usize)
    }

    /// Rewrite prev-hash links and refresh hashes for every record after
    /// `index`, in ascending order, so each record sees its predecessor's
    /// already-updated hash before refreshing its own.
    fn relink_after(&mut self, index: usize) {
        for i in index + 1..self.records.len() {
            let prev_hash = self.records[i - 1].hash().to_owned();
            self.records[i].set_prev_hash(prev_hash);
            self.records[i].refresh_hash();
        }
        debug!(
            from_position = index as u64 + 1,
            relinked = self.records.len() - index - 1,
            "downstream records relinked"
        );
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
