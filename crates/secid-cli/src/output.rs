pub mod stream_writer;

use std::io::{self, Write};

use self::stream_writer::{
    NdjsonStreamWriter, StreamEnd, StreamPayload, StreamStart, StreamStatus,
};
use crate::cli::OutputFormat;
use crate::commands::BatchData;
use crate::envelope::Envelope;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<BatchData>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(&mut out, envelope)?,
    }

    Ok(())
}

pub fn render_stream(envelope: &Envelope<BatchData>) -> Result<(), CliError> {
    let stdout = io::stdout();
    write_stream(stdout.lock(), envelope)
}

fn write_stream(out: impl Write, envelope: &Envelope<BatchData>) -> Result<(), CliError> {
    let mut writer = NdjsonStreamWriter::new(out);
    let results = &envelope.data.results;

    writer.emit(StreamPayload::Start(StreamStart::new(&envelope.meta, results.len())))?;

    for row in results {
        writer.emit(StreamPayload::Chunk(row))?;
    }

    for error in &envelope.errors {
        writer.emit(StreamPayload::Error(error))?;
    }

    let status = if envelope.errors.is_empty() {
        StreamStatus::Ok
    } else {
        StreamStatus::Error
    };
    writer.emit(StreamPayload::End(StreamEnd {
        status,
        summary: envelope.data.summary,
        warnings: &envelope.meta.warnings,
        elapsed_ms: envelope.meta.elapsed_ms,
    }))?;

    Ok(())
}

fn render_table(out: &mut impl Write, envelope: &Envelope<BatchData>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "command     : {}", envelope.meta.command)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "elapsed_ms  : {}", envelope.meta.elapsed_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    let width = envelope
        .data
        .results
        .iter()
        .map(|row| row.input.chars().count())
        .max()
        .unwrap_or(0)
        .max("INPUT".len());

    writeln!(out, "{:<width$}  STATUS   DETAIL", "INPUT")?;
    for row in &envelope.data.results {
        let status = if row.valid { "ok" } else { "invalid" };
        writeln!(out, "{:<width$}  {:<7}  {}", row.input, status, row.summary)?;
    }

    let summary = &envelope.data.summary;
    writeln!(
        out,
        "total={} valid={} invalid={}",
        summary.total, summary.valid, summary.invalid
    )?;

    Ok(())
}
