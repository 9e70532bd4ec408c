//! Cubewalk core library.
//!
//! Simulates random walks on the cube graph, collects how long each walk
//! takes to come back to its start vertex, and fits a least-squares line to
//! the log of the resulting frequencies.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod background;
mod builder;
mod error;
mod graph;
mod histogram;
mod regression;
mod simulation;
mod summary;
mod walk;

pub use crate::{
    background::{CancellationToken, SimulationTask},
    builder::{DEFAULT_TRIALS, SimulationBuilder},
    error::{Result, SimulationError, SimulationErrorCode, SlopeError, SlopeErrorCode},
    graph::{
        AdjacencyTable, CubeGraph, DEGREE, GraphInvariantViolation, VERTEX_COUNT, Vertex,
        validate_adjacency,
    },
    histogram::Histogram,
    regression::{LinearFit, fit, slope},
    simulation::Simulation,
    summary::SimulationSummary,
    walk::RandomWalk,
};
