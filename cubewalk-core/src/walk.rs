//! Return-time random walks on the cube graph.

use rand::Rng;
use tracing::trace;

use crate::graph::{CubeGraph, Vertex};

/// Runs random walks over a borrowed [`CubeGraph`].
///
/// A walk starts at some vertex, steps to a uniformly chosen neighbour until
/// it stands on the start vertex again, and reports how many steps that took.
/// No step cap is applied: the cube is a finite irreducible chain, so every
/// walk returns with probability one.
///
/// # Examples
/// ```
/// use cubewalk_core::{CubeGraph, RandomWalk};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = CubeGraph::new();
/// let walk = RandomWalk::new(&graph);
/// let mut rng = SmallRng::seed_from_u64(3);
/// assert!(walk.walk(&mut rng) >= 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk<'g> {
    graph: &'g CubeGraph,
}

impl<'g> RandomWalk<'g> {
    /// Creates a walker over `graph`.
    #[must_use]
    pub const fn new(graph: &'g CubeGraph) -> Self {
        Self { graph }
    }

    /// Walks from a uniformly random start vertex and returns the number of
    /// steps taken to come back to it. Always at least `1`.
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let start = self.graph.random_vertex(rng);
        self.walk_from(start, rng)
    }

    /// Walks from `start` and returns the number of steps taken to come back
    /// to it. Always at least `1`.
    pub fn walk_from<R: Rng + ?Sized>(&self, start: Vertex, rng: &mut R) -> u64 {
        let mut current = start;
        let mut steps = 0_u64;
        loop {
            steps += 1;
            current = self.graph.random_neighbour(current, rng);
            if current == start {
                trace!(start = start.get(), steps, "walk returned");
                return steps;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(0xDEAD_BEEF)]
    fn walks_take_at_least_two_steps(#[case] seed: u64) {
        let graph = CubeGraph::new();
        let walk = RandomWalk::new(&graph);
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..500 {
            // The cube has no self-loops, so the shortest return is out and back.
            assert!(walk.walk(&mut rng) >= 2);
        }
    }

    #[rstest]
    fn return_times_are_even() {
        // The cube is bipartite on bit parity, so every closed walk is even.
        let graph = CubeGraph::new();
        let walk = RandomWalk::new(&graph);
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..500 {
            assert_eq!(walk.walk(&mut rng) % 2, 0);
        }
    }

    #[rstest]
    fn walk_from_is_deterministic_under_a_seed() {
        let graph = CubeGraph::new();
        let walk = RandomWalk::new(&graph);
        let start = Vertex::new(4).expect("4 is a cube corner");
        let first: Vec<u64> = {
            let mut rng = SmallRng::seed_from_u64(17);
            (0..64).map(|_| walk.walk_from(start, &mut rng)).collect()
        };
        let second: Vec<u64> = {
            let mut rng = SmallRng::seed_from_u64(17);
            (0..64).map(|_| walk.walk_from(start, &mut rng)).collect()
        };
        assert_eq!(first, second);
    }
}
