//! Cryptographic primitives for the Correction Value Ledger (CVL).
//!
//! Provides domain-separated BLAKE3 hashing over canonical JSON encodings,
//! producing lowercase hex digests. Everything wraps established libraries;
//! there is no custom cryptography here.

pub mod hasher;

pub use hasher::{CanonicalHasher, HasherError};
