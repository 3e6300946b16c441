//! Stateful nodes driving joiners and collectors.
//!
//! Nodes own every piece of retained state: inserted tuples, index entries,
//! accumulators and undo tokens, all keyed by tuple identity. Callers drive
//! them synchronously with insert and retract; an update is a retract
//! followed by an insert.

mod group;
mod join;


pub use group::GroupNode;
pub use join::{JoinEvent, JoinNode};
