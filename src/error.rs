//! Crate-wide error taxonomy.

use thiserror::Error;

/// Error kinds raised by the partitioner, the policy algebra, and the
/// algorithm façades.
#[derive(Error, Debug, Clone)]
pub enum ParallexError {
    /// Empty range where not allowed, unreachable sentinel, or mismatched
    /// sizes for binary inputs.
    #[error("shape error: {0}")]
    Shape(String),

    /// Combinator misuse, e.g. an unsupported task-mode/chunking
    /// combination.
    #[error("policy error: {0}")]
    Policy(String),

    /// A predicate, projection, reducer, or body callable raised.
    #[error("user callable failed in chunk {chunk_index}: {message}")]
    UserCallable { chunk_index: usize, message: String },

    /// A shadow/partial buffer could not be allocated.
    #[error("allocation failure: {0}")]
    Allocation(String),

    /// The executor rejected a task spawn.
    #[error("executor rejected task: {0}")]
    Executor(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ParallexError>;

impl ParallexError {
    pub fn shape(msg: impl Into<String>) -> Self {
        ParallexError::Shape(msg.into())
    }

    pub fn policy(msg: impl Into<String>) -> Self {
        ParallexError::Policy(msg.into())
    }

    pub fn user_callable(chunk_index: usize, msg: impl Into<String>) -> Self {
        ParallexError::UserCallable {
            chunk_index,
            message: msg.into(),
        }
    }

    pub fn allocation(msg: impl Into<String>) -> Self {
        ParallexError::Allocation(msg.into())
    }

    pub fn executor(msg: impl Into<String>) -> Self {
        ParallexError::Executor(msg.into())
    }

    /// The source-order chunk index the error originated in, when known.
    /// Used by the partitioner to pick the first-in-source-order error
    /// among several chunks that failed concurrently.
    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            ParallexError::UserCallable { chunk_index, .. } => Some(*chunk_index),
            _ => None,
        }
    }
}
