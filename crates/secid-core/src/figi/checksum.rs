//! Modified Luhn check digit.
//!
//! Letters expand to `A=10 .. Z=35`. The value of every second character
//! (0-based odd index) is doubled, the decimal digits of all values are
//! summed, and the check digit brings that sum up to a multiple of ten.

use super::structure::{self, BASE_LEN};
use crate::error::ParseError;

/// Computes the check digit for an 11-character FIGI base.
pub fn check_digit(base: &str) -> Result<u8, ParseError> {
    structure::validate_base(base)?;
    Ok(compute(&base.as_bytes()[..BASE_LEN]))
}

/// Compares the trailing digit of a structurally valid FIGI with the
/// computed one.
pub fn verify(figi: &str) -> Result<(), ParseError> {
    let bytes = figi.as_bytes();
    let expected = compute(&bytes[..BASE_LEN]);
    let found = bytes[BASE_LEN];

    if found.wrapping_sub(b'0') != expected {
        return Err(ParseError::InvalidChecksum {
            expected,
            found: char::from(found),
        });
    }

    Ok(())
}

fn compute(base: &[u8]) -> u8 {
    let sum: u32 = base
        .iter()
        .enumerate()
        .map(|(index, &byte)| {
            let value = char_value(byte);
            let weighted = if index % 2 == 1 { value * 2 } else { value };
            weighted / 10 + weighted % 10
        })
        .sum();

    // sum % 10 < 10, so the result always fits a single digit.
    ((10 - sum % 10) % 10) as u8
}

fn char_value(byte: u8) -> u32 {
    match byte {
        b'0'..=b'9' => u32::from(byte - b'0'),
        b'A'..=b'Z' => u32::from(byte - b'A') + 10,
        // unreachable after structural validation
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_published_examples() {
        for figi in ["BBG000B9XVV8", "BBG000BLNNH6", "KKG000003B64", "BBG007Z1JW11", "BBG000BPH459"] {
            let expected = figi.as_bytes()[BASE_LEN] - b'0';
            assert_eq!(check_digit(&figi[..BASE_LEN]), Ok(expected), "{figi}");
            verify(figi).expect("check digit should match");
        }
    }

    #[test]
    fn reports_expected_and_found_digits() {
        let err = verify("BBG000B9XVV7").expect_err("must fail");
        assert_eq!(
            err,
            ParseError::InvalidChecksum {
                expected: 8,
                found: '7'
            }
        );
    }

    #[test]
    fn doubles_odd_positions_only() {
        // "B" at index 0 counts 1+1, the digits after it contribute nothing;
        // "BB" doubles the second B to 22 -> 2+2.
        assert_eq!(compute(b"B0000000000"), 8);
        assert_eq!(compute(b"BB000000000"), 4);
    }

    #[test]
    fn rejects_structurally_invalid_base() {
        let err = check_digit("US037833100").expect_err("must fail");
        assert!(matches!(err, ParseError::InvalidFormat { ch: 'U', index: 0 }));

        let err = check_digit("BBG000B9XVV8").expect_err("must fail");
        assert_eq!(err, ParseError::InvalidLength { expected: 11, len: 12 });
    }
}
