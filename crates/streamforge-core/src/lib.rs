//! Core types for StreamForge.
//!
//! This crate provides the pieces every other StreamForge crate shares:
//! - Fixed-arity tuples (`(A,)` through `(A, B, C, D, E)`) and tuple identities
//! - The [`StreamError`] type raised when an insert/retract pairing is broken

pub mod error;
pub mod tuple;

#[cfg(test)]
mod error_tests;

pub use error::{Result, StreamError};
pub use tuple::{uni, Append, JoinedId, Tuple, TupleId};
