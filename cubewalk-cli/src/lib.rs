//! Support library for the `cubewalk` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and integration
//! tests can drive a run without spawning a subprocess.

pub mod cli;
pub mod logging;
