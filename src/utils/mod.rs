//! Utility helpers for the public kernel.
//! Bounded arrays and the optional parallel execution switch.

pub mod array;
pub mod parallel;

pub use array::{BoundedVec, CapacityError, Sentinel};
pub use parallel::{parallelism_enabled, set_parallelism, ParallelismGuard};
