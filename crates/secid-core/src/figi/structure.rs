//! Positional grammar of a FIGI.
//!
//! ```text
//!  B B G 0 0 0 B 9 X V V 8
//!  └┬┘ │ └──────┬──────┘ │
//! prefix G    random    check digit
//! ```
//!
//! Rules run in a fixed order so the same input always reports the same
//! failure: length, charset, prefix, global marker, check-digit slot.

use crate::error::{FigiComponent, ParseError};

/// Total length of a FIGI.
pub const FIGI_LEN: usize = 12;

/// Length of a FIGI without its check digit.
pub const BASE_LEN: usize = FIGI_LEN - 1;

/// Digits plus upper-case consonants (Y included).
pub const ALPHABET: &str = "0123456789BCDFGHJKLMNPQRSTVWXYZ";

/// Two-letter prefixes that would collide with ISIN country codes.
pub const PROHIBITED_PREFIXES: [&str; 7] = ["BS", "BM", "GG", "GB", "GH", "KY", "VG"];

const GLOBAL_MARKER: u8 = b'G';
const GLOBAL_MARKER_INDEX: usize = 2;

/// Returns true when `ch` belongs to [`ALPHABET`].
pub fn is_figi_char(ch: char) -> bool {
    ch.is_ascii_digit() || (ch.is_ascii_uppercase() && !matches!(ch, 'A' | 'E' | 'I' | 'O' | 'U'))
}

/// Checks every structural rule of a full 12-character FIGI.
///
/// The check digit's value is not verified here, only that the slot holds
/// a decimal digit.
pub fn validate(input: &str) -> Result<(), ParseError> {
    validate_positions(input, FIGI_LEN)?;

    let last = input.as_bytes()[BASE_LEN];
    if !last.is_ascii_digit() {
        return Err(ParseError::InvalidFormat {
            ch: char::from(last),
            index: BASE_LEN,
        });
    }

    Ok(())
}

/// Checks the structural rules that apply to the 11 characters preceding
/// the check digit.
pub fn validate_base(base: &str) -> Result<(), ParseError> {
    validate_positions(base, BASE_LEN)
}

fn validate_positions(input: &str, expected: usize) -> Result<(), ParseError> {
    let len = input.chars().count();
    if len != expected {
        return Err(ParseError::InvalidLength { expected, len });
    }

    for (index, ch) in input.chars().enumerate() {
        if !is_figi_char(ch) {
            return Err(ParseError::InvalidFormat { ch, index });
        }
    }

    // Charset check guarantees ASCII from here on.
    let bytes = input.as_bytes();
    let prefix = &input[..GLOBAL_MARKER_INDEX];
    let is_letter_pair = bytes[..GLOBAL_MARKER_INDEX]
        .iter()
        .all(u8::is_ascii_uppercase);
    if !is_letter_pair || PROHIBITED_PREFIXES.contains(&prefix) {
        return Err(ParseError::InvalidComponent {
            component: FigiComponent::Prefix,
            found: prefix.to_owned(),
            index: 0,
        });
    }

    let marker = bytes[GLOBAL_MARKER_INDEX];
    if marker != GLOBAL_MARKER {
        return Err(ParseError::InvalidComponent {
            component: FigiComponent::GlobalMarker,
            found: char::from(marker).to_string(),
            index: GLOBAL_MARKER_INDEX,
        });
    }

    Ok(())
}
