use cubewalk_core::{Simulation, SimulationBuilder};

/// Builds a seeded simulation, panicking on invalid test configuration.
#[must_use]
pub fn seeded(trials: usize, seed: u64) -> Simulation {
    SimulationBuilder::new()
        .with_trials(trials)
        .with_seed(seed)
        .build()
        .expect("test configuration must be valid")
}
