//! Frequency histogram of walk return times.
//!
//! Buckets are kept in ascending step order so rendering and fitting see the
//! same deterministic sequence regardless of insertion order.

use std::collections::BTreeMap;

/// Maps a return time (in steps) to how many walks took exactly that long.
///
/// Buckets only exist for step counts that were observed at least once.
///
/// # Examples
/// ```
/// use cubewalk_core::Histogram;
///
/// let histogram: Histogram = [2, 4, 2, 6].into_iter().collect();
/// assert_eq!(histogram.trials(), 4);
/// assert_eq!(histogram.frequency(2), 2);
/// assert_eq!(histogram.frequency(3), 0);
/// assert!((histogram.mean() - 3.5).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    buckets: BTreeMap<u64, u64>,
    trials: u64,
    total_steps: u128,
}

impl Histogram {
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one walk that returned after `steps` steps.
    pub fn record(&mut self, steps: u64) {
        *self.buckets.entry(steps).or_insert(0) += 1;
        self.trials += 1;
        self.total_steps += u128::from(steps);
    }

    /// Number of walks recorded.
    #[rustfmt::skip]
    #[must_use]
    pub const fn trials(&self) -> u64 { self.trials }

    /// Sum of every recorded return time.
    #[rustfmt::skip]
    #[must_use]
    pub const fn total_steps(&self) -> u128 { self.total_steps }

    /// Number of walks that took exactly `steps` steps.
    #[must_use]
    pub fn frequency(&self, steps: u64) -> u64 {
        self.buckets.get(&steps).copied().unwrap_or(0)
    }

    /// Number of distinct return times observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` when no walk has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Largest bucket count, or `0` for an empty histogram.
    #[must_use]
    pub fn max_frequency(&self) -> u64 {
        self.buckets.values().copied().max().unwrap_or(0)
    }

    /// Iterates over `(steps, frequency)` pairs in ascending step order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.buckets.iter().map(|(&steps, &count)| (steps, count))
    }

    /// Mean return time, or `0.0` when nothing has been recorded.
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "the mean of integer step counts is fractional"
    )]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.trials as f64
    }

    /// Returns `(steps, ln(frequency))` points in ascending step order.
    ///
    /// The natural log is taken of the raw count rather than the relative
    /// frequency; the two differ by the constant `ln(trials)` and fit to the
    /// same slope.
    #[expect(
        clippy::cast_precision_loss,
        reason = "step counts and frequencies are far below 2^53"
    )]
    #[must_use]
    pub fn log_points(&self) -> Vec<(f64, f64)> {
        self.iter()
            .map(|(steps, count)| (steps as f64, (count as f64).ln()))
            .collect()
    }
}

impl Extend<u64> for Histogram {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for steps in iter {
            self.record(steps);
        }
    }
}

impl FromIterator<u64> for Histogram {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut histogram = Self::new();
        histogram.extend(iter);
        histogram
    }
}
