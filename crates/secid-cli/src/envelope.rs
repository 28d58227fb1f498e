use secid_core::ParseError;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard response envelope for all `secid` machine-readable outputs.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T, errors: Vec<EnvelopeError>) -> Self {
        Self { meta, data, errors }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: Uuid,
    pub command: &'static str,
    pub schema_version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(command: &'static str, elapsed_ms: u64) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            command,
            schema_version: SCHEMA_VERSION,
            generated_at: OffsetDateTime::now_utc(),
            elapsed_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// One rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeError {
    pub code: &'static str,
    pub message: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub detail: ParseError,
}

impl EnvelopeError {
    pub fn from_parse(input: impl Into<String>, error: &ParseError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            input: input.into(),
            position: error.position(),
            detail: error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;

    #[test]
    fn meta_serializes_rfc3339_timestamp_and_uuid() {
        let meta = EnvelopeMeta::new("validate", 3);
        let value = serde_json::to_value(&meta).expect("serialize");

        assert_eq!(value["schema_version"], "v1.0.0");
        assert_eq!(value["command"], "validate");
        assert_eq!(value["elapsed_ms"], 3);
        let generated_at = value["generated_at"].as_str().expect("string timestamp");
        assert!(generated_at.ends_with('Z'), "unexpected timestamp {generated_at}");
        let request_id = value["request_id"].as_str().expect("string id");
        assert!(Uuid::parse_str(request_id).is_ok());
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn error_carries_code_position_and_detail() {
        let parse_error = ParseError::UnknownProvider {
            found: "quotes".into(),
            position: 6,
        };
        let error = EnvelopeError::from_parse("//blp/quotes/bbgid/BBG000B9XVV8", &parse_error);
        let value = serde_json::to_value(&error).expect("serialize");

        assert_eq!(value["code"], "unknown_provider");
        assert_eq!(value["position"], 6);
        assert_eq!(value["detail"]["kind"], "unknown_provider");
        assert_eq!(value["detail"]["found"], "quotes");
    }

    #[test]
    fn length_error_omits_position() {
        let parse_error = ParseError::InvalidLength {
            expected: 12,
            len: 3,
        };
        let value = serde_json::to_value(EnvelopeError::from_parse("abc", &parse_error))
            .expect("serialize");
        assert_eq!(value.get("position"), None::<&Value>);
    }
}
