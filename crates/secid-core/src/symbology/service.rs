use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::combinator::cut;
use nom::sequence::terminated;
use serde::{Deserialize, Serialize};

use super::combinator::{
    complete, double_slash, end_of_input, keyword, slash, Keyword, PResult, Reason,
};
use crate::ParseError;

/// Addressing scheme of a service prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Blp,
}

impl Scheme {
    pub const ALL: [Self; 1] = [Self::Blp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blp => "blp",
        }
    }
}

impl Keyword for Scheme {
    const MEMBERS: &'static [Self] = &Self::ALL;

    fn keyword(self) -> &'static str {
        self.as_str()
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value).ok_or_else(|| ParseError::UnknownScheme {
            found: value.to_owned(),
            position: 0,
        })
    }
}

/// Data provider within a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    RefData,
    MktData,
    MktBar,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::RefData, Self::MktData, Self::MktBar];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RefData => "refdata",
            Self::MktData => "mktdata",
            Self::MktBar => "mktbar",
        }
    }
}

impl Keyword for Provider {
    const MEMBERS: &'static [Self] = &Self::ALL;

    fn keyword(self) -> &'static str {
        self.as_str()
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value).ok_or_else(|| ParseError::UnknownProvider {
            found: value.to_owned(),
            position: 0,
        })
    }
}

/// `//<scheme>/<provider>` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Service {
    pub scheme: Scheme,
    pub provider: Provider,
}

impl Service {
    pub const fn new(scheme: Scheme, provider: Provider) -> Self {
        Self { scheme, provider }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "//{}/{}", self.scheme, self.provider)
    }
}

/// Backtracks only when the input does not start with `//`.
pub(crate) fn service(input: &str) -> PResult<'_, Service> {
    let (rest, _) = double_slash(input)?;
    cut(service_body)(rest)
}

fn service_body(input: &str) -> PResult<'_, Service> {
    let (rest, scheme) = keyword::<Scheme>("scheme", Reason::UnknownScheme)(input)?;
    let (rest, _) = slash(rest)?;
    let (rest, provider) = keyword::<Provider>("provider", Reason::UnknownProvider)(rest)?;
    Ok((rest, Service::new(scheme, provider)))
}

impl FromStr for Service {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        complete(terminated(service, end_of_input), value)
    }
}
