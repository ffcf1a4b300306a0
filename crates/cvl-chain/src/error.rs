/// Errors produced by chain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("position {position} is out of range for a chain of {len} record(s)")]
    PositionOutOfRange { position: u64, len: u64 },

    #[error("no nonce found for prefix {target_prefix:?} within {max_iterations} iteration(s)")]
    SearchExhausted {
        target_prefix: String,
        max_iterations: u64,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}
