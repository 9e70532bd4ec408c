//! Benchmark support crate for cubewalk.
//!
//! Provides the parameter and setup-error types shared by the Criterion
//! benchmarks for single walks, histogram fitting and full simulation runs.

pub mod error;
pub mod params;
