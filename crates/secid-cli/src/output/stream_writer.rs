use std::io::Write;

use secid_core::BatchReport;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::commands::ResultRow;
use crate::envelope::{EnvelopeError, EnvelopeMeta};
use crate::error::CliError;

/// Opens a stream and announces how many chunks follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamStart {
    pub request_id: Uuid,
    pub command: &'static str,
    pub schema_version: &'static str,
    pub count: usize,
}

impl StreamStart {
    pub fn new(meta: &EnvelopeMeta, count: usize) -> Self {
        Self {
            request_id: meta.request_id,
            command: meta.command,
            schema_version: meta.schema_version,
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Ok,
    Error,
}

/// Closes a stream with the batch totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEnd<'a> {
    pub status: StreamStatus,
    #[serde(flatten)]
    pub summary: BatchReport,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub warnings: &'a [String],
    pub elapsed_ms: u64,
}

/// Event body; the variant name becomes the `event` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum StreamPayload<'a> {
    Start(StreamStart),
    Chunk(&'a ResultRow),
    Error(&'a EnvelopeError),
    End(StreamEnd<'a>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamEvent<'a> {
    pub seq: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    #[serde(flatten)]
    pub payload: StreamPayload<'a>,
}

/// Writes one JSON event per line, flushing after each.
pub struct NdjsonStreamWriter<W: Write> {
    writer: W,
    next_seq: u64,
}

impl<W: Write> NdjsonStreamWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_seq: 1,
        }
    }

    pub fn emit(&mut self, payload: StreamPayload<'_>) -> Result<(), CliError> {
        let event = StreamEvent {
            seq: self.next_seq,
            ts: OffsetDateTime::now_utc(),
            payload,
        };
        self.next_seq += 1;

        let line = serde_json::to_string(&event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use secid_core::ParseError;
    use serde_json::{json, Value};

    fn events(sink: &[u8]) -> Vec<Value> {
        std::str::from_utf8(sink)
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).expect("json line"))
            .collect()
    }

    #[test]
    fn numbers_events_in_emission_order() {
        let meta = EnvelopeMeta::new("validate", 4);
        let row = ResultRow::accepted(
            "BBG000B9XVV8",
            json!({ "figi": "BBG000B9XVV8" }),
            "BBG000B9XVV8",
        );
        let mut sink = Vec::<u8>::new();

        {
            let mut writer = NdjsonStreamWriter::new(&mut sink);
            writer
                .emit(StreamPayload::Start(StreamStart::new(&meta, 1)))
                .expect("start");
            writer.emit(StreamPayload::Chunk(&row)).expect("chunk");
            writer
                .emit(StreamPayload::End(StreamEnd {
                    status: StreamStatus::Ok,
                    summary: BatchReport {
                        total: 1,
                        valid: 1,
                        invalid: 0,
                    },
                    warnings: &meta.warnings,
                    elapsed_ms: meta.elapsed_ms,
                }))
                .expect("end");
        }

        let events = events(&sink);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["seq"], 1);
        assert_eq!(events[0].pointer("/data/command"), Some(&json!("validate")));
        assert_eq!(events[1]["event"], "chunk");
        assert_eq!(events[1].pointer("/data/output/figi"), Some(&json!("BBG000B9XVV8")));
        assert_eq!(events[2]["event"], "end");
        assert_eq!(events[2]["seq"], 3);
        assert_eq!(events[2].pointer("/data/status"), Some(&json!("ok")));
        assert_eq!(events[2].pointer("/data/valid"), Some(&json!(1)));
        assert!(events[2].pointer("/data/warnings").is_none());
    }

    #[test]
    fn error_event_carries_the_envelope_error() {
        let error = EnvelopeError::from_parse(
            "BBG000B9XVV7",
            &ParseError::InvalidChecksum {
                expected: 8,
                found: '7',
            },
        );
        let mut sink = Vec::<u8>::new();

        {
            let mut writer = NdjsonStreamWriter::new(&mut sink);
            writer.emit(StreamPayload::Error(&error)).expect("error event");
        }

        let event = &events(&sink)[0];
        assert_eq!(event["event"], "error");
        assert_eq!(event.pointer("/data/code"), Some(&json!("invalid_checksum")));
        assert_eq!(event.pointer("/data/input"), Some(&json!("BBG000B9XVV7")));
        assert!(event.get("ts").and_then(Value::as_str).is_some());
    }
}
