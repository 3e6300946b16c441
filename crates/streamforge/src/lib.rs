//! StreamForge - incremental constraint stream matching and aggregation.
//!
//! Joiners decide which facts combine into tuples, collectors aggregate
//! groups of tuples with exact undo, and join/group nodes keep both
//! consistent under inserts and retracts.
//!
//! # Example
//!
//! ```rust
//! use streamforge::prelude::*;
//!
//! let collector = count_distinct(|age: &u32| *age);
//! let mut acc = collector.create_accumulator();
//! let undos: Vec<_> = [20, 25, 30, 30, 20]
//!     .iter()
//!     .map(|age| collector.accumulate(&mut acc, age))
//!     .collect();
//! assert_eq!(collector.finish(&acc), 3);
//! # drop(undos);
//! ```

mod logging;

pub use logging::init_tracing;

// Core types
pub use streamforge_core::{uni, Append, JoinedId, Result, StreamError, Tuple, TupleId};

// Configuration
pub use streamforge_config::{ConfigError, EnvironmentMode, StreamConfig};

// Joiners, collectors and nodes
pub use streamforge_scoring::stream;
pub use streamforge_scoring::{Collector, GroupNode, IndexedJoiner, JoinEvent, JoinNode, Joiner, JoinerType};

pub mod prelude {
    pub use super::stream::collector::{
        average, compose, compose3, conditionally, count, count_distinct, count_long, max, max_by,
        min, min_by, sum, sum_with, to_list, to_map, to_map_merged, to_map_with, to_set,
        to_sorted_map, to_sorted_map_merged, to_sorted_map_with, to_sorted_set, to_sorted_set_by,
    };
    pub use super::stream::joiner::{
        during, equal, equal_bi, filtering, greater_than, greater_than_or_equal, identity,
        less_than, less_than_or_equal, merge, overlapping, Unindexed,
    };
    pub use super::{
        uni, Collector, EnvironmentMode, GroupNode, IndexedJoiner, JoinEvent, JoinNode, Joiner,
        JoinerType, StreamConfig, StreamError, TupleId,
    };
}
