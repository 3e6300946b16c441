//! Shared test fixtures for StreamForge crates.
//!
//! Plain data types, no engine logic, so every crate can take this as a
//! dev-dependency without cycles.
//!
//! - [`person`] - people with a name and an age
//! - [`shift`] - employee shifts over integer time
//! - [`interval`] - half-open integer intervals
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! streamforge-test = { workspace = true }
//! ```

pub mod interval;
pub mod person;
pub mod shift;

pub use interval::Interval;
pub use person::{people, Person};
pub use shift::{shifts, Shift};
