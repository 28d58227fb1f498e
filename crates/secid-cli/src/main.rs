mod cli;
mod commands;
mod config;
mod envelope;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    logging::init(&settings.logging, settings.verbose);
    settings.log_origin(&cli);

    let envelope = commands::run(&cli.command, &settings)?;
    if settings.stream {
        output::render_stream(&envelope)?;
    } else {
        output::render(&envelope, settings.format, settings.pretty)?;
    }

    if settings.strict && !envelope.meta.warnings.is_empty() {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
        });
    }

    if !envelope.errors.is_empty() {
        return Err(CliError::InputsRejected {
            rejected: envelope.errors.len(),
            total: envelope.data.summary.total,
        });
    }

    Ok(())
}
