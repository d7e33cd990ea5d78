//! Execution support for compression planning
//!
//! Provides the bounded worker pool used to score columns in parallel.

pub mod parallel;

pub use parallel::*;
