//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of using
//! `.expect()`.

use cubewalk_core::{SimulationError, SlopeError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or running a simulation failed.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    /// Fitting a prepared histogram failed.
    #[error("slope fit failed: {0}")]
    Fit(#[from] SlopeError),
}
