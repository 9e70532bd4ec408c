//! Structural invariants for the cube adjacency table.
//!
//! Every row must list [`DEGREE`] distinct in-range neighbours other than the
//! vertex itself, every link must have a matching backlink, and every vertex
//! must be reachable from vertex `0`.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use super::{AdjacencyTable, DEGREE, VERTEX_COUNT};

/// A violated adjacency invariant.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GraphInvariantViolation {
    /// A row referenced a vertex id outside the graph.
    #[error("vertex {vertex} lists neighbour {neighbour}, which is not a vertex")]
    NeighbourOutOfRange {
        /// Vertex whose row holds the bad entry.
        vertex: usize,
        /// The out-of-range neighbour id.
        neighbour: u8,
    },
    /// A vertex listed itself as a neighbour.
    #[error("vertex {vertex} lists itself as a neighbour")]
    SelfLoop {
        /// Vertex with the self-loop.
        vertex: usize,
    },
    /// A vertex listed the same neighbour twice.
    #[error("vertex {vertex} lists neighbour {neighbour} more than once")]
    DuplicateNeighbour {
        /// Vertex whose row repeats an entry.
        vertex: usize,
        /// The repeated neighbour id.
        neighbour: usize,
    },
    /// A link had no reverse link.
    #[error("link {origin} -> {target} has no backlink")]
    MissingBacklink {
        /// Vertex holding the link.
        origin: usize,
        /// Vertex lacking the reverse link.
        target: usize,
    },
    /// A vertex cannot be reached from vertex `0`.
    #[error("vertex {vertex} is unreachable from vertex 0")]
    Unreachable {
        /// The unreachable vertex.
        vertex: usize,
    },
}

/// Checks `table` for range, self-loop, duplicate, symmetry and connectivity
/// violations, in that order.
///
/// # Errors
/// Returns the first [`GraphInvariantViolation`] encountered.
///
/// # Examples
/// ```
/// use cubewalk_core::{GraphInvariantViolation, validate_adjacency};
///
/// let mut table = [[1, 3, 4], [0, 2, 5], [1, 3, 6], [0, 2, 7],
///                  [0, 5, 7], [1, 4, 6], [2, 5, 7], [3, 4, 6]];
/// assert!(validate_adjacency(&table).is_ok());
///
/// table[0] = [0, 3, 4];
/// assert_eq!(
///     validate_adjacency(&table),
///     Err(GraphInvariantViolation::SelfLoop { vertex: 0 }),
/// );
/// ```
pub fn validate_adjacency(table: &AdjacencyTable) -> Result<(), GraphInvariantViolation> {
    check_rows(table)?;
    check_backlinks(table)?;
    check_reachability(table)
}

fn check_rows(table: &AdjacencyTable) -> Result<(), GraphInvariantViolation> {
    for (vertex, row) in table.iter().enumerate() {
        let mut seen = [false; VERTEX_COUNT];
        for &neighbour in row {
            let index = usize::from(neighbour);
            let Some(slot) = seen.get_mut(index) else {
                return Err(GraphInvariantViolation::NeighbourOutOfRange { vertex, neighbour });
            };
            if index == vertex {
                return Err(GraphInvariantViolation::SelfLoop { vertex });
            }
            if *slot {
                return Err(GraphInvariantViolation::DuplicateNeighbour {
                    vertex,
                    neighbour: index,
                });
            }
            *slot = true;
        }
    }
    Ok(())
}

fn check_backlinks(table: &AdjacencyTable) -> Result<(), GraphInvariantViolation> {
    for (origin, row) in table.iter().enumerate() {
        for &neighbour in row {
            let target = usize::from(neighbour);
            let has_backlink = table
                .get(target)
                .is_some_and(|back| back.iter().any(|&id| usize::from(id) == origin));
            if !has_backlink {
                debug!(origin, target, "missing backlink");
                return Err(GraphInvariantViolation::MissingBacklink { origin, target });
            }
        }
    }
    Ok(())
}

fn check_reachability(table: &AdjacencyTable) -> Result<(), GraphInvariantViolation> {
    let mut visited = [false; VERTEX_COUNT];
    let mut queue = VecDeque::with_capacity(VERTEX_COUNT);
    visited[0] = true;
    queue.push_back(0_usize);

    while let Some(vertex) = queue.pop_front() {
        let Some(row) = table.get(vertex) else {
            continue;
        };
        for &neighbour in row {
            let next = usize::from(neighbour);
            if let Some(flag) = visited.get_mut(next) {
                if !*flag {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }
    }

    match visited.iter().position(|&reached| !reached) {
        Some(vertex) => {
            debug!(vertex, degree = DEGREE, "vertex unreachable from origin");
            Err(GraphInvariantViolation::Unreachable { vertex })
        }
        None => Ok(()),
    }
}
