//! Entry point for the `cubewalk` binary.
//!
//! Parses arguments with clap, runs the simulation, prints the summary to
//! stdout and maps failures to a non-zero exit code. Logging is initialised
//! first so the run emits structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cubewalk_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field, warn};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let cli_error = err.downcast_ref::<CliError>();
        let (code, fit_code) = cli_error
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some((Some(core.code()), core.fit_code())),
                CliError::WorkerDisconnected => None,
            })
            .unwrap_or((None, None));

        let code_field = code.map(|code| field::display(code.as_str()));
        let fit_code_field = fit_code.map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            code = code_field,
            fit_code = fit_code_field,
            "command execution failed"
        );
        if let Some(hint) = cli_error.and_then(CliError::retry_hint) {
            warn!("{hint}");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
