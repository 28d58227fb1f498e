use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::combinator::{map, opt};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::combinator::{at_sign, complete, end_of_input, slash, suffix, whitespace, PResult};
use super::identifier::{identifier, IdentifierType, SecurityId};
use super::service::{service, Service};
use super::suffix::{pricing_source, yellow_key, PricingSource, YellowKey};
use crate::config::ParserOptions;
use crate::{Figi, ParseError};

/// Decomposed symbology string.
///
/// The identifier type is derived from the [`SecurityId`] variant, so a
/// locator can never pair `bbgid` with anything but a [`Figi`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityLocator {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    service: Option<Service>,
    security_id: SecurityId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pricing_source: Option<PricingSource>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    yellow_key: Option<YellowKey>,
}

impl SecurityLocator {
    pub fn new(service: Option<Service>, security_id: impl Into<SecurityId>) -> Self {
        Self {
            service,
            security_id: security_id.into(),
            pricing_source: None,
            yellow_key: None,
        }
    }

    pub fn with_pricing_source(mut self, pricing_source: PricingSource) -> Self {
        self.pricing_source = Some(pricing_source);
        self
    }

    pub fn with_yellow_key(mut self, yellow_key: YellowKey) -> Self {
        self.yellow_key = Some(yellow_key);
        self
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_locator_with(input, &ParserOptions::default())
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn id_type(&self) -> IdentifierType {
        self.security_id.id_type()
    }

    pub fn security_id(&self) -> &SecurityId {
        &self.security_id
    }

    pub fn figi(&self) -> Option<&Figi> {
        self.security_id.as_figi()
    }

    pub fn pricing_source(&self) -> Option<&PricingSource> {
        self.pricing_source.as_ref()
    }

    pub fn yellow_key(&self) -> Option<YellowKey> {
        self.yellow_key
    }
}

impl Display for SecurityLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(service) = &self.service {
            write!(f, "{service}")?;
        }
        write!(f, "/{}/{}", self.id_type(), self.security_id)?;
        if let Some(pricing_source) = &self.pricing_source {
            write!(f, "@{pricing_source}")?;
        }
        if let Some(yellow_key) = self.yellow_key {
            write!(f, " {yellow_key}")?;
        }
        Ok(())
    }
}

impl FromStr for SecurityLocator {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Parses `[//<scheme>/<provider>]/<id-type>/<id-value>[@<source>][ <key>]`.
pub fn parse_locator_with(
    input: &str,
    options: &ParserOptions,
) -> Result<SecurityLocator, ParseError> {
    let result = complete(|rest| locator(rest, options), input);
    match &result {
        Ok(parsed) => trace!(input, id_type = %parsed.id_type(), "parsed security locator"),
        Err(error) => debug!(input, code = error.code(), %error, "rejected security locator"),
    }
    result
}

fn locator<'a>(input: &'a str, options: &ParserOptions) -> PResult<'a, SecurityLocator> {
    let (rest, service) = if options.require_service {
        map(service, Some)(input)?
    } else {
        opt(service)(input)?
    };
    let (rest, _) = slash(rest)?;
    let (rest, security_id) = identifier(rest)?;
    let (rest, pricing_source) = suffix(at_sign, pricing_source)(rest)?;
    let (rest, yellow_key) = suffix(whitespace, yellow_key)(rest)?;
    let (rest, _) = end_of_input(rest)?;

    Ok((
        rest,
        SecurityLocator {
            service,
            security_id,
            pricing_source,
            yellow_key,
        },
    ))
}
