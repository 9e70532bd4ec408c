//! Command-line interface for the cube random-walk simulation.
//!
//! A single `run` command performs the walks on a worker thread, then prints
//! the average return time, the fitted log slope and a text histogram.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, MAX_BAR_WIDTH, RunCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
