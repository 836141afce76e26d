//! Error types shared by the benchmark engine.
//!
//! Nothing here is retried: a connection failure aborts the scenario run
//! before any measurement is recorded, and a correctness violation aborts the
//! current invocation so the host records a failed run instead of a timing
//! sample.

use thiserror::Error;

pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Connection or command failure in the store client.
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),

    /// A value read back from the store could not be interpreted as an
    /// integer.
    #[error("non-integer value for key {key:?}: {raw:?}")]
    BadValue { key: String, raw: String },

    /// The correctness oracle found a mismatch between the expected and the
    /// observed result of a batch.
    #[error("correctness violation in {scenario}: expected {expected}, actual {actual}")]
    Correctness {
        scenario: String,
        expected: String,
        actual: String,
    },
}

impl BenchError {
    /// Whether this failure came from the oracle rather than infrastructure.
    pub fn is_correctness(&self) -> bool {
        matches!(self, BenchError::Correctness { .. })
    }
}
