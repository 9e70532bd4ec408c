//! Outcome of a completed simulation run.

use crate::histogram::Histogram;

/// Histogram, mean return time and log slope produced by one run.
///
/// A summary is built once per run and never modified; a new run produces a
/// new summary.
///
/// # Examples
/// ```
/// use cubewalk_core::SimulationBuilder;
///
/// let summary = SimulationBuilder::new()
///     .with_trials(500)
///     .with_seed(1)
///     .build()
///     .expect("trial count is positive")
///     .run()
///     .expect("500 walks give many buckets");
/// assert_eq!(summary.trials(), 500);
/// assert_eq!(summary.seed(), Some(1));
/// assert!(summary.slope() < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    histogram: Histogram,
    average: f64,
    slope: f64,
    seed: Option<u64>,
}

impl SimulationSummary {
    pub(crate) const fn new(
        histogram: Histogram,
        average: f64,
        slope: f64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            histogram,
            average,
            slope,
            seed,
        }
    }

    /// Return-time frequencies observed during the run.
    #[must_use]
    pub const fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Mean number of steps taken to return to the start vertex.
    #[rustfmt::skip]
    #[must_use]
    pub const fn average(&self) -> f64 { self.average }

    /// Least-squares slope of `ln(frequency)` against return time.
    #[rustfmt::skip]
    #[must_use]
    pub const fn slope(&self) -> f64 { self.slope }

    /// Number of walks performed.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.histogram.trials()
    }

    /// Seed the run was configured with, if any.
    #[rustfmt::skip]
    #[must_use]
    pub const fn seed(&self) -> Option<u64> { self.seed }

    /// Consumes the summary and returns its histogram.
    #[must_use]
    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }
}
