use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::bytes::complete::take_till;
use nom::Err;
use serde::{Deserialize, Serialize};

use super::combinator::{
    commit_on_match, expected, is_space, Branch, GrammarError, Keyword, PResult, Reason,
};
use crate::{Figi, ParseError};

/// Identifier-type discriminator of a symbology string.
///
/// `isin`, `cusip` and `sedol` get a variant here once their value parsers
/// exist; until then they are reported as unknown types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Bbgid,
}

impl IdentifierType {
    pub const ALL: [Self; 1] = [Self::Bbgid];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bbgid => "bbgid",
        }
    }

    /// Human-readable name of the value this type carries.
    pub const fn value_label(self) -> &'static str {
        match self {
            Self::Bbgid => Figi::LABEL,
        }
    }
}

impl Keyword for IdentifierType {
    const MEMBERS: &'static [Self] = &Self::ALL;

    fn keyword(self) -> &'static str {
        self.as_str()
    }
}

impl Display for IdentifierType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierType {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value).ok_or_else(|| ParseError::UnknownIdentifierType {
            found: value.to_owned(),
            position: 0,
        })
    }
}

/// Validated identifier value. The variant determines the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "id_type", content = "value")]
pub enum SecurityId {
    #[serde(rename = "bbgid")]
    Figi(Figi),
}

impl SecurityId {
    pub const fn id_type(&self) -> IdentifierType {
        match self {
            Self::Figi(_) => IdentifierType::Bbgid,
        }
    }

    pub fn as_figi(&self) -> Option<&Figi> {
        match self {
            Self::Figi(figi) => Some(figi),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Figi(figi) => figi.as_str(),
        }
    }
}

impl Display for SecurityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Figi> for SecurityId {
    fn from(value: Figi) -> Self {
        Self::Figi(value)
    }
}

const BRANCHES: &[(IdentifierType, Branch<SecurityId>)] = &[(IdentifierType::Bbgid, bbgid_value)];

/// `<id-type>/<id-value>`, committed to the sub-parser of the matched type.
pub(crate) fn identifier(input: &str) -> PResult<'_, SecurityId> {
    let (rest, (_, value)) =
        commit_on_match("identifier type", BRANCHES, Reason::UnknownIdentifierType)(input)?;
    Ok((rest, value))
}

fn is_value_terminator(ch: char) -> bool {
    ch == '@' || is_space(ch)
}

fn bbgid_value(input: &str) -> PResult<'_, SecurityId> {
    let (rest, raw) = expected(Figi::LABEL, take_till(is_value_terminator))(input)?;
    match Figi::parse(raw) {
        Ok(figi) => Ok((rest, SecurityId::Figi(figi))),
        Err(cause) => Err(Err::Failure(GrammarError::new(
            input,
            Reason::SubParse {
                type_label: IdentifierType::Bbgid.value_label(),
                cause,
            },
        ))),
    }
}
