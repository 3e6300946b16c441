//! Error types for StreamForge

use thiserror::Error;

/// Main error type for StreamForge operations.
///
/// Every variant except [`StreamError::Config`] reports a broken
/// insert/retract pairing upstream. The owning session should discard
/// the whole stream graph and rebuild it rather than keep going.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A counted value was removed more times than it was added
    #[error("Impossible state: a value of type {type_name} was removed more times than it was added")]
    Underflow { type_name: &'static str },

    /// A tuple was retracted that is not currently inserted
    #[error("Impossible state: tuple {0} was retracted but is not inserted")]
    UnknownTuple(String),

    /// A tuple was inserted while already present
    #[error("Impossible state: tuple {0} was inserted twice")]
    DuplicateTuple(String),

    /// An indexed lookup disagreed with a full scan
    #[error("Index mismatch: indexed lookup found {indexed} candidates, full scan found {scanned}")]
    IndexMismatch { indexed: usize, scanned: usize },

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StreamError {
    /// Builds an [`StreamError::Underflow`] for values of type `T`.
    pub fn underflow<T: ?Sized>() -> Self {
        StreamError::Underflow {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns true for the fatal insert/retract consistency errors.
    pub fn is_consistency_error(&self) -> bool {
        !matches!(self, StreamError::Config(_))
    }
}

/// Result type alias for StreamForge operations
pub type Result<T> = std::result::Result<T, StreamError>;
