//! Command implementations and argument parsing for the cubewalk CLI.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::sync::mpsc;

use clap::{Args, Parser, Subcommand};
use cubewalk_core::{
    DEFAULT_TRIALS, Histogram, SimulationBuilder, SimulationError, SimulationSummary,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Widest histogram bar the renderer will draw.
pub const MAX_BAR_WIDTH: usize = 1_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cubewalk",
    about = "Simulate random walks on a cube and fit the log slope of their return times."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a simulation and print the histogram, average and log slope.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of walks to perform.
    #[arg(
        long,
        short = 'n',
        default_value_t = DEFAULT_TRIALS,
        value_parser = clap::value_parser!(usize),
    )]
    pub trials: usize,

    /// Seed for a reproducible run (defaults to OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Width in characters of the longest histogram bar (1 to 1000).
    #[arg(long = "bar-width", default_value = "40", value_parser = parse_bar_width)]
    pub bar_width: NonZeroUsize,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The simulation failed to configure or run.
    #[error(transparent)]
    Core(#[from] SimulationError),
    /// The worker exited without delivering an outcome.
    #[error("simulation worker exited without delivering a result")]
    WorkerDisconnected,
}

impl CliError {
    /// Returns a hint for the user when re-running with more trials may help.
    #[must_use]
    pub fn retry_hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) if core.is_retryable() => {
                Some("simulation failed: not enough distinct return times, try more trials")
            }
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Histogram, average and slope produced by the run.
    pub result: SimulationSummary,
    /// Width of the longest histogram bar when rendering.
    pub bar_width: NonZeroUsize,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::num::NonZeroUsize;
/// # use cubewalk_cli::cli::{Cli, Command, RunCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         trials: 300,
///         seed: Some(12),
///         bar_width: NonZeroUsize::new(20).ok_or("zero width")?,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.trials(), 300);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(trials = command.trials, seed = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let simulation = SimulationBuilder::new()
        .with_trials(command.trials)
        .with_optional_seed(command.seed)
        .build()?;

    if let Some(seed) = command.seed {
        Span::current().record("seed", seed);
    }

    let (sender, receiver) = mpsc::channel();
    let task = simulation.spawn(move |outcome| {
        // The receiver only disappears if this function already returned.
        let _ = sender.send(outcome);
    })?;
    info!("simulating");

    let outcome = receiver.recv().map_err(|_| CliError::WorkerDisconnected);
    task.join()?;
    let result = outcome??;

    info!(
        buckets = result.histogram().len(),
        average = result.average(),
        slope = result.slope(),
        "command completed"
    );
    Ok(ExecutionSummary {
        result,
        bar_width: command.bar_width,
    })
}

/// Renders `summary` to `writer` as a header followed by a text bar chart.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::num::NonZeroUsize;
/// # use cubewalk_cli::cli::{ExecutionSummary, render_summary};
/// # use cubewalk_core::SimulationBuilder;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let result = SimulationBuilder::new().with_trials(100).with_seed(2).build()?.run()?;
/// let summary = ExecutionSummary {
///     result,
///     bar_width: NonZeroUsize::new(10).ok_or("zero width")?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("trials: 100\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    writeln!(writer, "trials: {}", result.trials())?;
    match result.seed() {
        Some(seed) => writeln!(writer, "seed: {seed}")?,
        None => writeln!(writer, "seed: entropy")?,
    }
    writeln!(writer, "average: {:.4}", result.average())?;
    writeln!(writer, "log slope: {:.6}", result.slope())?;
    writeln!(writer)?;
    writeln!(writer, "steps\tfrequency")?;
    render_bars(result.histogram(), summary.bar_width, &mut writer)
}

fn render_bars(
    histogram: &Histogram,
    bar_width: NonZeroUsize,
    writer: &mut impl Write,
) -> io::Result<()> {
    let max = histogram.max_frequency();
    for (steps, count) in histogram.iter() {
        let bar = "#".repeat(bar_length(count, max, bar_width));
        writeln!(writer, "{steps}\t{count}\t{bar}")?;
    }
    Ok(())
}

/// Scales `count` against `max` so the largest bucket spans `bar_width`
/// characters and every non-empty bucket gets at least one.
///
/// Widths above [`MAX_BAR_WIDTH`] are clamped to it.
pub(super) fn bar_length(count: u64, max: u64, bar_width: NonZeroUsize) -> usize {
    if max == 0 {
        return 0;
    }
    let limit = bar_width.get().min(MAX_BAR_WIDTH);
    let width = u128::try_from(limit).unwrap_or(u128::MAX);
    let scaled = (u128::from(count.min(max)) * width).div_ceil(u128::from(max));
    usize::try_from(scaled).unwrap_or(limit)
}

pub(super) fn parse_bar_width(raw: &str) -> Result<NonZeroUsize, String> {
    let width: NonZeroUsize = raw.parse().map_err(|err: std::num::ParseIntError| err.to_string())?;
    if width.get() > MAX_BAR_WIDTH {
        return Err(format!("must be at most {MAX_BAR_WIDTH}"));
    }
    Ok(width)
}
