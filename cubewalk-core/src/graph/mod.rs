//! Fixed cube graph used by the random walk.
//!
//! The cube has eight corners. Reading a vertex id as a 3-bit `(x, y, z)`
//! string, each corner is joined to the three corners that differ in exactly
//! one bit. The adjacency is a constant table, so a [`CubeGraph`] is usable as
//! soon as it is constructed and never changes afterwards.

mod invariants;

use rand::Rng;

pub use self::invariants::{GraphInvariantViolation, validate_adjacency};

/// Number of vertices in the cube graph.
pub const VERTEX_COUNT: usize = 8;

/// Number of neighbours of every vertex.
pub const DEGREE: usize = 3;

#[expect(
    clippy::cast_possible_truncation,
    reason = "VERTEX_COUNT is 8 and fits in u8"
)]
const VERTEX_IDS: u8 = VERTEX_COUNT as u8;

/// Neighbour table, one row per vertex id.
pub type AdjacencyTable = [[u8; DEGREE]; VERTEX_COUNT];

const CUBE_ADJACENCY: AdjacencyTable = [
    [1, 3, 4],
    [0, 2, 5],
    [1, 3, 6],
    [0, 2, 7],
    [0, 5, 7],
    [1, 4, 6],
    [2, 5, 7],
    [3, 4, 6],
];

/// Identifier of a cube corner.
///
/// Vertices are compared by id; there is no notion of object identity.
///
/// # Examples
/// ```
/// use cubewalk_core::Vertex;
///
/// let vertex = Vertex::new(5).expect("5 is a cube corner");
/// assert_eq!(vertex.get(), 5);
/// assert!(Vertex::new(8).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex(u8);

impl Vertex {
    /// Creates a vertex, returning `None` when `id` is not below
    /// [`VERTEX_COUNT`].
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id < VERTEX_IDS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Returns the numeric vertex id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    #[rustfmt::skip]
    pub(crate) const fn index(self) -> usize { self.0 as usize }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cube graph: eight vertices, each with three neighbours.
///
/// # Examples
/// ```
/// use cubewalk_core::{CubeGraph, Vertex};
///
/// let graph = CubeGraph::new();
/// let origin = Vertex::new(0).expect("0 is a cube corner");
/// let ids: Vec<u8> = graph.neighbours(origin).iter().map(|v| v.get()).collect();
/// assert_eq!(ids, vec![1, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeGraph {
    adjacency: [[Vertex; DEGREE]; VERTEX_COUNT],
}

impl Default for CubeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeGraph {
    /// Builds the cube graph from its constant adjacency table.
    #[must_use]
    pub const fn new() -> Self {
        let mut adjacency = [[Vertex(0); DEGREE]; VERTEX_COUNT];
        let mut vertex = 0;
        while vertex < VERTEX_COUNT {
            let mut slot = 0;
            while slot < DEGREE {
                adjacency[vertex][slot] = Vertex(CUBE_ADJACENCY[vertex][slot]);
                slot += 1;
            }
            vertex += 1;
        }
        Self { adjacency }
    }

    /// Returns the neighbours of `vertex` in table order.
    #[expect(
        clippy::indexing_slicing,
        reason = "Vertex ids are validated to lie below VERTEX_COUNT"
    )]
    #[must_use]
    pub const fn neighbours(&self, vertex: Vertex) -> &[Vertex; DEGREE] {
        &self.adjacency[vertex.index()]
    }

    /// Iterates over every vertex in id order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..VERTEX_IDS).map(Vertex)
    }

    /// Returns the number of undirected edges.
    #[expect(
        clippy::integer_division,
        reason = "every undirected edge appears twice in the adjacency rows"
    )]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().flatten().count() / 2
    }

    /// Returns the degree of `vertex`.
    #[must_use]
    pub const fn degree(&self, vertex: Vertex) -> usize {
        self.neighbours(vertex).len()
    }

    /// Expected number of steps for a walk started at `vertex` to return to
    /// it, `2|E| / deg(vertex)`.
    ///
    /// # Examples
    /// ```
    /// use cubewalk_core::{CubeGraph, Vertex};
    ///
    /// let graph = CubeGraph::new();
    /// let vertex = Vertex::new(3).expect("3 is a cube corner");
    /// assert!((graph.expected_return_time(vertex) - 8.0).abs() < f64::EPSILON);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "edge and degree counts are tiny; the ratio is fractional in general"
    )]
    #[must_use]
    pub fn expected_return_time(&self, vertex: Vertex) -> f64 {
        2.0 * self.edge_count() as f64 / self.degree(vertex) as f64
    }

    /// Picks a vertex uniformly at random.
    pub fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Vertex {
        Vertex(rng.gen_range(0..VERTEX_IDS))
    }

    /// Picks one of the neighbours of `vertex` uniformly at random.
    #[expect(
        clippy::indexing_slicing,
        reason = "the sampled slot is drawn from 0..DEGREE"
    )]
    pub fn random_neighbour<R: Rng + ?Sized>(&self, vertex: Vertex, rng: &mut R) -> Vertex {
        let slot = rng.gen_range(0..DEGREE);
        self.neighbours(vertex)[slot]
    }

    /// Checks that the graph is a simple, undirected, connected graph with
    /// every vertex of degree [`DEGREE`].
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found.
    pub fn validate(&self) -> Result<(), GraphInvariantViolation> {
        validate_adjacency(&self.raw_adjacency())
    }

    fn raw_adjacency(&self) -> AdjacencyTable {
        let mut table = [[0; DEGREE]; VERTEX_COUNT];
        for (row, neighbours) in table.iter_mut().zip(&self.adjacency) {
            for (slot, neighbour) in row.iter_mut().zip(neighbours) {
                *slot = neighbour.get();
            }
        }
        table
    }
}
