//! Optional trailing components: `@<pricing-source>` and ` <yellow-key>`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::bytes::complete::take_while1;
use nom::combinator::{map, verify};
use serde::{Deserialize, Serialize};

use super::combinator::{complete, end_of_input, expected, keyword, Keyword, PResult, Reason};
use crate::ParseError;

const PRICING_SOURCE_LABEL: &str = "pricing source";
const YELLOW_KEY_LABEL: &str = "yellow key";

/// Longest pricing-source mnemonic accepted after `@`.
pub const MAX_PRICING_SOURCE_LEN: usize = 8;

/// Pricing-source mnemonic such as `BVAL` or `CBBT`, stored upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PricingSource(String);

impl PricingSource {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        complete(pricing_source_whole, input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PricingSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingSource {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PricingSource {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PricingSource> for String {
    fn from(value: PricingSource) -> Self {
        value.0
    }
}

/// Bloomberg market sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YellowKey {
    Govt,
    Corp,
    Mtge,
    #[serde(rename = "M-Mkt")]
    MMkt,
    Muni,
    Pfd,
    Equity,
    Comdty,
    Index,
    Curncy,
}

impl YellowKey {
    pub const ALL: [Self; 10] = [
        Self::Govt,
        Self::Corp,
        Self::Mtge,
        Self::MMkt,
        Self::Muni,
        Self::Pfd,
        Self::Equity,
        Self::Comdty,
        Self::Index,
        Self::Curncy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Govt => "Govt",
            Self::Corp => "Corp",
            Self::Mtge => "Mtge",
            Self::MMkt => "M-Mkt",
            Self::Muni => "Muni",
            Self::Pfd => "Pfd",
            Self::Equity => "Equity",
            Self::Comdty => "Comdty",
            Self::Index => "Index",
            Self::Curncy => "Curncy",
        }
    }
}

impl Keyword for YellowKey {
    const MEMBERS: &'static [Self] = &Self::ALL;

    fn keyword(self) -> &'static str {
        self.as_str()
    }
}

impl Display for YellowKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YellowKey {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value).ok_or_else(|| ParseError::UnexpectedToken {
            expected: YELLOW_KEY_LABEL,
            found: value.to_owned(),
            position: 0,
        })
    }
}

pub(crate) fn pricing_source(input: &str) -> PResult<'_, PricingSource> {
    expected(
        PRICING_SOURCE_LABEL,
        map(
            verify(take_while1(|ch: char| ch.is_ascii_alphanumeric()), |raw: &str| {
                raw.len() <= MAX_PRICING_SOURCE_LEN
            }),
            |raw: &str| PricingSource(raw.to_ascii_uppercase()),
        ),
    )(input)
}

fn pricing_source_whole(input: &str) -> PResult<'_, PricingSource> {
    let (rest, parsed) = pricing_source(input)?;
    let (rest, _) = end_of_input(rest)?;
    Ok((rest, parsed))
}

pub(crate) fn yellow_key(input: &str) -> PResult<'_, YellowKey> {
    // An unknown sector is reported as "expected yellow key".
    let mut key = keyword::<YellowKey>(YELLOW_KEY_LABEL, Reason::Expected(YELLOW_KEY_LABEL));
    key(input)
}
