//! Benchmark parameter types.

use std::fmt;

/// Parameters for a simulation benchmark run.
#[derive(Clone, Debug)]
pub struct SimulationBenchParams {
    /// Number of walks per run.
    pub trials: usize,
}

impl fmt::Display for SimulationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trials={}", self.trials)
    }
}

/// Parameters for a regression benchmark run.
#[derive(Clone, Debug)]
pub struct FitBenchParams {
    /// Number of `(steps, ln count)` points being fitted.
    pub points: usize,
}

impl fmt::Display for FitBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "points={}", self.points)
    }
}
