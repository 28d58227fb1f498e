//! # FIGI
//!
//! Financial Instrument Global Identifier value type.
//!
//! A [`Figi`] can only be obtained through [`Figi::parse`] (or the
//! conversions that delegate to it), so every instance has passed both the
//! positional grammar in [`structure`] and the check digit in [`checksum`].
//!
//! ```rust
//! use secid_core::{Figi, ParseError};
//!
//! let figi = Figi::parse("BBG000B9XVV8")?;
//! assert_eq!(figi.as_str(), "BBG000B9XVV8");
//! assert_eq!(figi.check_digit(), 8);
//!
//! let err = Figi::parse("BBG000B9XVV7").unwrap_err();
//! assert!(matches!(err, ParseError::InvalidChecksum { expected: 8, .. }));
//! # Ok::<(), ParseError>(())
//! ```

pub mod checksum;
pub mod structure;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

use self::structure::BASE_LEN;

/// Validated, immutable FIGI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Figi(String);

impl Figi {
    /// Label used when a FIGI failure is reported from inside a larger grammar.
    pub const LABEL: &'static str = "FIGI";

    /// Runs the structural rules, then the check digit.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        structure::validate(input)?;
        checksum::verify(input)?;
        Ok(Self(input.to_owned()))
    }

    /// Builds a FIGI from its first 11 characters by appending the computed
    /// check digit.
    pub fn from_base(base: &str) -> Result<Self, ParseError> {
        let digit = checksum::check_digit(base)?;
        Ok(Self(format!("{base}{digit}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter prefix.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }

    /// The eight characters between the `G` marker and the check digit.
    pub fn random_part(&self) -> &str {
        &self.0[3..BASE_LEN]
    }

    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[BASE_LEN] - b'0'
    }
}

impl Display for Figi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Figi {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Figi {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Figi {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Figi> for String {
    fn from(value: Figi) -> Self {
        value.0
    }
}

impl AsRef<str> for Figi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FigiComponent;

    #[test]
    fn parses_and_exposes_components() {
        let figi = Figi::parse("BBG000B9XVV8").expect("figi should parse");
        assert_eq!(figi.prefix(), "BB");
        assert_eq!(figi.random_part(), "000B9XVV");
        assert_eq!(figi.check_digit(), 8);
        assert_eq!(figi.to_string(), "BBG000B9XVV8");
    }

    #[test]
    fn does_not_trim_or_normalize() {
        let err = Figi::parse(" BBG000B9XVV8").expect_err("must fail");
        assert!(matches!(err, ParseError::InvalidLength { len: 13, .. }));
    }

    #[test]
    fn structural_errors_win_over_checksum() {
        let err = Figi::parse("BSG000B9XVV0").expect_err("must fail");
        assert!(matches!(
            err,
            ParseError::InvalidComponent {
                component: FigiComponent::Prefix,
                ..
            }
        ));
    }

    #[test]
    fn isin_is_not_a_figi() {
        let err = Figi::parse("US0378331005").expect_err("must fail");
        assert!(matches!(err, ParseError::InvalidFormat { ch: 'U', index: 0 }));
    }

    #[test]
    fn from_base_appends_check_digit() {
        let figi = Figi::from_base("KKG000003B6").expect("base should be valid");
        assert_eq!(figi.as_str(), "KKG000003B64");
    }

    #[test]
    fn serde_round_trips_through_validation() {
        let figi = Figi::parse("BBG007Z1JW11").expect("figi should parse");
        let json = serde_json::to_string(&figi).expect("serialize");
        assert_eq!(json, "\"BBG007Z1JW11\"");

        let back: Figi = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, figi);

        let err = serde_json::from_str::<Figi>("\"BBG007Z1JW12\"").expect_err("must fail");
        assert!(err.to_string().contains("check digit"));
    }
}
