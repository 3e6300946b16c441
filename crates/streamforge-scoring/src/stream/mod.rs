//! Joiners, indexes, collectors and the nodes that drive them.
//!
//! # Example
//!
//! ```
//! use streamforge_core::TupleId;
//! use streamforge_scoring::stream::collector::count;
//! use streamforge_scoring::stream::joiner::equal_bi;
//! use streamforge_scoring::stream::node::{GroupNode, JoinNode};
//!
//! // Pair each shift with its employee, then count shifts per employee.
//! let mut join = JoinNode::new(equal_bi(|s: &(u32,)| s.0, |e: &u32| *e));
//! join.insert_right(TupleId(10), 7u32).unwrap();
//! let events = join.insert_left(TupleId(1), (7u32,)).unwrap();
//! assert_eq!(events.len(), 1);
//!
//! let mut per_employee = GroupNode::new(|pair: &(u32, u32)| pair.1, count());
//! per_employee.insert(TupleId(1), &(7, 7)).unwrap();
//! assert_eq!(per_employee.result(&7), Some(1));
//! ```

pub mod collector;
pub mod index;
pub mod joiner;
pub mod node;
