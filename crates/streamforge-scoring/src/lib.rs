//! Zero-erasure incremental matching and aggregation for StreamForge.
//!
//! This crate provides the stateful core of a constraint stream network:
//! - Joiners deciding which tuples combine, with index hints (`stream::joiner`)
//! - Hash, range and scan indexes behind join nodes (`stream::index`)
//! - Collectors with exact per-tuple undo (`stream::collector`)
//! - Join and group nodes driving both (`stream::node`)
//!
//! # Architecture
//!
//! All evaluation is fully monomorphized - no `Box<dyn Trait>` in hot paths.
//! Closures are stored as generic type parameters, not `Arc<dyn Fn>`.
//! State is single-threaded per network; one session owns one network.

// Zero-erasure architecture intentionally uses complex generic types
#![allow(clippy::type_complexity)]

pub mod stream;

pub use stream::collector::Collector;
pub use stream::joiner::{IndexedJoiner, Joiner, JoinerType};
pub use stream::node::{GroupNode, JoinEvent, JoinNode};
