//! Hash-chained record ledger for the Correction Value Ledger (CVL).
//!
//! This crate is the heart of CVL. It provides:
//! - `Record`: position, payload, previous-hash link, correction value, digest
//! - Canonical hash derivation and prefix-targeted nonce search
//! - `Chain`: genesis construction, append, correction with downstream relink
//! - Chain-wide validity checking

pub mod chain;
pub mod error;
pub mod record;

pub use chain::Chain;
pub use error::ChainError;
pub use record::{Record, GENESIS_PREV_HASH};
