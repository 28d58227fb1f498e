mod check_digit;
mod parse;
mod validate;

use std::io::{self, BufRead};
use std::time::Instant;

use secid_core::BatchReport;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::Command;
use crate::config::Settings;
use crate::envelope::{Envelope, EnvelopeError, EnvelopeMeta};
use crate::error::CliError;

/// Per-input outcome shown in `data.results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// One-line rendering for table output.
    #[serde(skip)]
    pub summary: String,
}

impl ResultRow {
    pub fn accepted(input: impl Into<String>, output: Value, summary: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            valid: true,
            output: Some(output),
            error: None,
            summary: summary.into(),
        }
    }

    pub fn rejected(input: impl Into<String>, error: &EnvelopeError) -> Self {
        Self {
            input: input.into(),
            valid: false,
            output: None,
            error: Some(error.code),
            summary: error.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchData {
    pub results: Vec<ResultRow>,
    pub summary: BatchReport,
}

pub struct CommandResult {
    pub rows: Vec<ResultRow>,
    pub errors: Vec<EnvelopeError>,
    pub warnings: Vec<String>,
    pub report: BatchReport,
}

impl CommandResult {
    /// Splits `(input, outcome)` pairs into rows and envelope errors.
    fn collect<T, E>(
        inputs: &[String],
        outcomes: &[Result<T, E>],
        mut accept: impl FnMut(&str, &T) -> Result<ResultRow, CliError>,
        mut reject: impl FnMut(&str, &E) -> EnvelopeError,
    ) -> Result<Self, CliError> {
        let mut rows = Vec::with_capacity(outcomes.len());
        let mut errors = Vec::new();

        for (input, outcome) in inputs.iter().zip(outcomes) {
            match outcome {
                Ok(value) => rows.push(accept(input, value)?),
                Err(error) => {
                    let error = reject(input, error);
                    rows.push(ResultRow::rejected(input.as_str(), &error));
                    errors.push(error);
                }
            }
        }

        Ok(Self {
            rows,
            errors,
            warnings: Vec::new(),
            report: BatchReport::from_results(outcomes),
        })
    }

    fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(command: &Command, settings: &Settings) -> Result<Envelope<BatchData>, CliError> {
    let started = Instant::now();

    let raw_inputs = match command {
        Command::Validate(args) => &args.inputs,
        Command::Parse(args) => &args.inputs,
        Command::CheckDigit(args) => &args.inputs,
    };
    let Inputs { values, skipped } = read_inputs(raw_inputs, io::stdin().lock())?;
    if values.is_empty() {
        return Err(CliError::NoInput);
    }
    debug!(command = command.name(), count = values.len(), "running command");

    let result = match command {
        Command::Validate(_) => validate::run(&values)?,
        Command::Parse(_) => parse::run(&values, &settings.parser)?,
        Command::CheckDigit(_) => check_digit::run(&values)?,
    };

    let CommandResult {
        rows,
        errors,
        warnings,
        report,
    } = result;

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(command.name(), elapsed_ms);
    if skipped > 0 {
        meta.push_warning(format!("skipped {skipped} blank input line(s)"));
    }
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::new(
        meta,
        BatchData {
            results: rows,
            summary: report,
        },
        errors,
    ))
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Inputs {
    values: Vec<String>,
    skipped: usize,
}

/// Expands `-` (or an empty argument list) into stdin lines. Blank lines
/// are skipped; other lines lose only their line terminator.
fn read_inputs(args: &[String], stdin: impl BufRead) -> Result<Inputs, CliError> {
    let reads_stdin = args.is_empty() || args.iter().any(|arg| arg == "-");
    let mut stdin_lines = Vec::new();
    let mut skipped = 0;

    if reads_stdin {
        for line in stdin.lines() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                skipped += 1;
            } else {
                stdin_lines.push(line.to_owned());
            }
        }
    }

    if args.is_empty() {
        return Ok(Inputs {
            values: stdin_lines,
            skipped,
        });
    }

    let mut values = Vec::with_capacity(args.len() + stdin_lines.len());
    let mut pending_stdin = Some(stdin_lines);
    for arg in args {
        if arg == "-" {
            values.extend(pending_stdin.take().unwrap_or_default());
        } else {
            values.push(arg.clone());
        }
    }

    Ok(Inputs { values, skipped })
}
