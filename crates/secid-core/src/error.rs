use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

/// Positional FIGI component checked by the structural rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigiComponent {
    /// Characters 1-2: a consonant pair outside the prohibited set.
    Prefix,
    /// Character 3: always `G`.
    GlobalMarker,
}

impl FigiComponent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::GlobalMarker => "global marker",
        }
    }
}

impl Display for FigiComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every reason a string can fail to become a [`crate::Figi`] or a
/// [`crate::SecurityLocator`].
///
/// Identifier-level variants carry a character index into the identifier.
/// Grammar-level variants carry the byte offset into the symbology string.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error("expected {expected} characters, got {len}")]
    InvalidLength { expected: usize, len: usize },
    #[error("invalid character '{ch}' at index {index}")]
    InvalidFormat { ch: char, index: usize },
    #[error("invalid {component} '{found}' at index {index}")]
    InvalidComponent {
        component: FigiComponent,
        found: String,
        index: usize,
    },
    #[error("check digit mismatch: expected {expected}, found '{found}'")]
    InvalidChecksum { expected: u8, found: char },

    #[error("expected {expected} at offset {position}, found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },
    #[error("unknown scheme '{found}' at offset {position}, expected blp")]
    UnknownScheme { found: String, position: usize },
    #[error("unknown provider '{found}' at offset {position}, expected one of refdata, mktdata, mktbar")]
    UnknownProvider { found: String, position: usize },
    #[error("unknown identifier type '{found}' at offset {position}, expected bbgid")]
    UnknownIdentifierType { found: String, position: usize },
    #[error("invalid {type_label} at offset {position}: {cause}")]
    CommittedSubParseFailed {
        type_label: &'static str,
        position: usize,
        cause: Box<ParseError>,
    },
}

impl ParseError {
    /// Stable machine-readable code for envelopes and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidLength { .. } => "invalid_length",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::InvalidComponent { .. } => "invalid_component",
            Self::InvalidChecksum { .. } => "invalid_checksum",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::UnknownScheme { .. } => "unknown_scheme",
            Self::UnknownProvider { .. } => "unknown_provider",
            Self::UnknownIdentifierType { .. } => "unknown_identifier_type",
            Self::CommittedSubParseFailed { .. } => "committed_sub_parse_failed",
        }
    }

    /// Returns true for the structural and check-digit failures of a bare identifier.
    pub const fn is_identifier_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::InvalidFormat { .. }
                | Self::InvalidComponent { .. }
                | Self::InvalidChecksum { .. }
        )
    }

    /// Where the failure was detected.
    ///
    /// `None` for length and checksum failures, which concern the whole
    /// identifier rather than one character.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidLength { .. } | Self::InvalidChecksum { .. } => None,
            Self::InvalidFormat { index, .. } | Self::InvalidComponent { index, .. } => Some(*index),
            Self::UnexpectedToken { position, .. }
            | Self::UnknownScheme { position, .. }
            | Self::UnknownProvider { position, .. }
            | Self::UnknownIdentifierType { position, .. }
            | Self::CommittedSubParseFailed { position, .. } => Some(*position),
        }
    }

    /// Innermost error, unwrapping committed sub-parse failures.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            Self::CommittedSubParseFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_identifier_errors() {
        assert!(ParseError::InvalidLength { expected: 12, len: 3 }.is_identifier_error());
        assert!(!ParseError::UnknownScheme {
            found: "xyz".into(),
            position: 2
        }
        .is_identifier_error());
    }

    #[test]
    fn root_cause_unwraps_nested_sub_parse_failures() {
        let inner = ParseError::InvalidChecksum {
            expected: 8,
            found: '7',
        };
        let wrapped = ParseError::CommittedSubParseFailed {
            type_label: "FIGI",
            position: 20,
            cause: Box::new(inner.clone()),
        };

        assert_eq!(wrapped.root_cause(), &inner);
        assert_eq!(wrapped.position(), Some(20));
        assert_eq!(wrapped.code(), "committed_sub_parse_failed");
    }

    #[test]
    fn message_names_the_wrapped_type() {
        let error = ParseError::CommittedSubParseFailed {
            type_label: "FIGI",
            position: 20,
            cause: Box::new(ParseError::InvalidFormat { ch: 'U', index: 0 }),
        };

        assert_eq!(
            error.to_string(),
            "invalid FIGI at offset 20: invalid character 'U' at index 0"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let error = ParseError::InvalidComponent {
            component: FigiComponent::Prefix,
            found: "BS".into(),
            index: 0,
        };
        let value = serde_json::to_value(&error).expect("serialize");

        assert_eq!(value["kind"], "invalid_component");
        assert_eq!(value["component"], "prefix");
        assert_eq!(value["found"], "BS");
    }
}
