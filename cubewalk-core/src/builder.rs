//! Builder utilities for configuring simulation runs.
//!
//! Exposes the trial count and optional seed and validates them before a
//! [`Simulation`] is constructed.

use std::num::NonZeroUsize;

use crate::{Result, error::SimulationError, simulation::Simulation};

/// Number of walks performed when the caller does not choose one.
pub const DEFAULT_TRIALS: usize = 1_000;

/// Configures and constructs [`Simulation`] instances.
///
/// # Examples
/// ```
/// use cubewalk_core::SimulationBuilder;
///
/// let simulation = SimulationBuilder::new()
///     .with_trials(250)
///     .with_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(simulation.trials().get(), 250);
/// assert_eq!(simulation.seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    trials: usize,
    seed: Option<u64>,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl SimulationBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use cubewalk_core::{DEFAULT_TRIALS, SimulationBuilder};
    ///
    /// let builder = SimulationBuilder::new();
    /// assert_eq!(builder.trials(), DEFAULT_TRIALS);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of walks to perform.
    #[must_use]
    pub const fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured number of walks.
    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Seeds the random number generator so the run is reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[must_use]
    pub const fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Simulation`].
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidTrialCount`] when the trial count is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use cubewalk_core::{SimulationBuilder, SimulationError};
    ///
    /// let err = SimulationBuilder::new().with_trials(0).build().unwrap_err();
    /// assert_eq!(err, SimulationError::InvalidTrialCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<Simulation> {
        let trials = NonZeroUsize::new(self.trials)
            .ok_or(SimulationError::InvalidTrialCount { got: self.trials })?;
        Ok(Simulation::new(trials, self.seed))
    }
}
