//! Simulation runs: repeated walks, histogram, mean and log slope.
//!
//! Provides the [`Simulation`] entry point. Runs are sequential and hold no
//! state between calls, so one failed run never affects the next.

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    background::CancellationToken,
    error::SimulationError,
    graph::CubeGraph,
    histogram::Histogram,
    regression,
    summary::SimulationSummary,
    walk::RandomWalk,
};

/// Entry point for running return-time simulations on the cube.
///
/// # Examples
/// ```
/// use cubewalk_core::SimulationBuilder;
///
/// let simulation = SimulationBuilder::new()
///     .with_trials(2_000)
///     .with_seed(9)
///     .build()
///     .expect("builder must succeed");
/// let summary = simulation.run().expect("run must succeed");
/// let recorded: u64 = summary.histogram().iter().map(|(_, count)| count).sum();
/// assert_eq!(recorded, 2_000);
/// assert!(summary.average() > 6.0 && summary.average() < 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    graph: CubeGraph,
    trials: NonZeroUsize,
    seed: Option<u64>,
}

impl Simulation {
    pub(crate) const fn new(trials: NonZeroUsize, seed: Option<u64>) -> Self {
        Self {
            graph: CubeGraph::new(),
            trials,
            seed,
        }
    }

    /// Returns the number of walks each run performs.
    #[must_use]
    pub const fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the graph the walks run on.
    #[must_use]
    pub const fn graph(&self) -> &CubeGraph {
        &self.graph
    }

    /// Performs every walk and summarises the return times.
    ///
    /// Seeded simulations are exactly reproducible; unseeded ones draw a fresh
    /// seed from the operating system on every run.
    ///
    /// # Errors
    /// Returns [`SimulationError::Fit`] when the observed return times do not
    /// support a slope (fewer than two distinct values).
    pub fn run(&self) -> Result<SimulationSummary> {
        self.run_cancellable(&CancellationToken::new())
    }

    /// Like [`Self::run`], but stops early once `token` is cancelled.
    ///
    /// The token is checked before each walk. A run that is never cancelled
    /// returns exactly what [`Self::run`] would.
    ///
    /// # Errors
    /// Returns [`SimulationError::Cancelled`] when cancellation is observed
    /// and [`SimulationError::Fit`] when no slope can be fitted.
    pub fn run_cancellable(&self, token: &CancellationToken) -> Result<SimulationSummary> {
        let mut rng = self.rng();
        self.run_inner(&mut rng, Some(token))
    }

    /// Performs every walk with a caller-supplied random number generator.
    ///
    /// # Errors
    /// Returns [`SimulationError::Fit`] when no slope can be fitted.
    ///
    /// # Examples
    /// ```
    /// use cubewalk_core::SimulationBuilder;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let simulation = SimulationBuilder::new().with_trials(300).build().expect("valid");
    /// let first = simulation.run_with_rng(&mut StdRng::seed_from_u64(5)).expect("run");
    /// let second = simulation.run_with_rng(&mut StdRng::seed_from_u64(5)).expect("run");
    /// assert_eq!(first.histogram(), second.histogram());
    /// ```
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationSummary> {
        self.run_inner(rng, None)
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    #[instrument(
        name = "core.run",
        err,
        skip(self, rng, token),
        fields(trials = self.trials.get(), seed = ?self.seed),
    )]
    fn run_inner<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        token: Option<&CancellationToken>,
    ) -> Result<SimulationSummary> {
        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let histogram = self.collect(rng, token)?;
        let average = histogram.mean();
        let slope = regression::slope(&histogram.log_points()).inspect_err(|err| {
            warn!(
                buckets = histogram.len(),
                code = %err.code(),
                "log-frequency fit failed"
            );
        })?;

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("cubewalk_walks_total").increment(histogram.trials());
            metrics::histogram!("cubewalk_run_seconds").record(started.elapsed().as_secs_f64());
        }

        info!(
            buckets = histogram.len(),
            average,
            slope,
            "simulation completed"
        );
        Ok(SimulationSummary::new(histogram, average, slope, self.seed))
    }

    fn collect<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        token: Option<&CancellationToken>,
    ) -> Result<Histogram> {
        let walk = RandomWalk::new(&self.graph);
        let trials = self.trials.get();
        let mut histogram = Histogram::new();
        for completed in 0..trials {
            if token.is_some_and(CancellationToken::is_cancelled) {
                debug!(completed, trials, "cancellation observed");
                return Err(SimulationError::Cancelled { completed, trials });
            }
            histogram.record(walk.walk(rng));
        }
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{SimulationBuilder, error::SlopeError};

    fn simulation(trials: usize, seed: u64) -> Simulation {
        SimulationBuilder::new()
            .with_trials(trials)
            .with_seed(seed)
            .build()
            .expect("test configuration is valid")
    }

    #[rstest]
    #[case(1)]
    #[case(37)]
    #[case(1_000)]
    fn histogram_sums_to_trials(#[case] trials: usize) {
        let sim = simulation(trials, 3);
        let histogram = sim
            .collect(&mut SmallRng::seed_from_u64(3), None)
            .expect("no token, no cancellation");
        let sum: u64 = histogram.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, u64::try_from(trials).expect("fits u64"));
    }

    #[rstest]
    fn single_walk_cannot_be_fitted() {
        let err = simulation(1, 12).run().expect_err("one walk gives one bucket");
        assert_eq!(
            err,
            SimulationError::Fit {
                source: SlopeError::InsufficientData { points: 1 }
            }
        );
        assert!(err.is_retryable());
    }

    #[rstest]
    fn cancelled_token_stops_before_first_walk() {
        let token = CancellationToken::new();
        token.cancel();
        let err = simulation(50, 1)
            .run_cancellable(&token)
            .expect_err("cancelled runs fail");
        assert_eq!(
            err,
            SimulationError::Cancelled {
                completed: 0,
                trials: 50
            }
        );
        assert!(!err.is_retryable());
    }

    #[rstest]
    fn uncancelled_token_matches_plain_run() {
        let sim = simulation(400, 77);
        let plain = sim.run().expect("run succeeds");
        let guarded = sim
            .run_cancellable(&CancellationToken::new())
            .expect("run succeeds");
        assert_eq!(plain, guarded);
    }

    #[cfg(feature = "metrics")]
    mod metrics_recorded {
        use std::sync::{
            Arc, Mutex, PoisonError,
            atomic::{AtomicU64, Ordering},
        };

        use metrics::{
            Counter, CounterFn, Gauge, Histogram as MetricHistogram, HistogramFn, Key, KeyName,
            Metadata, Recorder, SharedString, Unit,
        };
        use rstest::rstest;

        use super::simulation;

        #[derive(Default)]
        struct Total(AtomicU64);

        impl CounterFn for Total {
            fn increment(&self, value: u64) {
                self.0.fetch_add(value, Ordering::Relaxed);
            }

            fn absolute(&self, value: u64) {
                self.0.fetch_max(value, Ordering::Relaxed);
            }
        }

        #[derive(Default)]
        struct Samples(Mutex<Vec<f64>>);

        impl HistogramFn for Samples {
            fn record(&self, value: f64) {
                self.0
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(value);
            }
        }

        #[derive(Default)]
        struct CapturingRecorder {
            walks: Arc<Total>,
            durations: Arc<Samples>,
        }

        impl Recorder for CapturingRecorder {
            fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
            fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
            fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

            fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
                if key.name() == "cubewalk_walks_total" {
                    Counter::from_arc(Arc::clone(&self.walks))
                } else {
                    Counter::noop()
                }
            }

            fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
                Gauge::noop()
            }

            fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> MetricHistogram {
                if key.name() == "cubewalk_run_seconds" {
                    MetricHistogram::from_arc(Arc::clone(&self.durations))
                } else {
                    MetricHistogram::noop()
                }
            }
        }

        #[rstest]
        fn completed_runs_report_walks_and_duration() {
            let recorder = CapturingRecorder::default();
            metrics::with_local_recorder(&recorder, || {
                simulation(300, 5).run().expect("run succeeds");
                simulation(200, 6).run().expect("run succeeds");
            });

            assert_eq!(recorder.walks.0.load(Ordering::Relaxed), 500);
            let durations = recorder
                .durations
                .0
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            assert_eq!(durations.len(), 2);
            assert!(durations.iter().all(|seconds| *seconds >= 0.0));
        }

        #[rstest]
        fn failed_fits_record_nothing() {
            let recorder = CapturingRecorder::default();
            metrics::with_local_recorder(&recorder, || {
                let _ = simulation(1, 5).run();
            });

            assert_eq!(recorder.walks.0.load(Ordering::Relaxed), 0);
        }
    }
}
