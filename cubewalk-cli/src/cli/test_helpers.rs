//! Small helpers shared across CLI tests.

use std::num::NonZeroUsize;

use super::commands::run_command;
use super::{Cli, CliError, Command, ExecutionSummary, RunCommand, render_summary, run_cli};

pub(super) fn width(value: usize) -> NonZeroUsize {
    match NonZeroUsize::new(value) {
        Some(width) => width,
        None => panic!("bar width must be non-zero"),
    }
}

pub(super) fn seeded_command(trials: usize, seed: u64) -> RunCommand {
    RunCommand {
        trials,
        seed: Some(seed),
        bar_width: width(40),
    }
}

pub(super) fn seeded_cli(trials: usize, seed: u64) -> Cli {
    Cli {
        command: Command::Run(seeded_command(trials, seed)),
    }
}

pub(super) fn render_to_string(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_summary(summary, &mut buffer) {
        panic!("rendering into memory failed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output was not UTF-8: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
