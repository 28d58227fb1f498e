//! # Symbology
//!
//! Grammar for Bloomberg-style security strings:
//!
//! ```text
//! //blp/mktdata/bbgid/BBG007Z1JW11@BVAL Govt
//! └────┬──────┘└─┬─┘ └─────┬────┘ └─┬┘ └─┬┘
//!   service   id-type   id-value  source yellow key
//! ```
//!
//! ## Parse order
//!
//! `service? → id-type → committed id-value → @source? → yellow key? → end`
//!
//! The identifier type is a discriminator: once `bbgid` matches, a bad value
//! surfaces as
//! [`ParseError::CommittedSubParseFailed`](crate::ParseError::CommittedSubParseFailed)
//! wrapping the
//! [`Figi`](crate::Figi) error, and no other type is tried.
//!
//! ```rust
//! use secid_core::{parse_locator, ParseError, Provider, YellowKey};
//!
//! let locator = parse_locator("//blp/mktdata/bbgid/BBG000B9XVV8 Equity")?;
//! assert_eq!(locator.service().map(|s| s.provider), Some(Provider::MktData));
//! assert_eq!(locator.yellow_key(), Some(YellowKey::Equity));
//!
//! let err = parse_locator("//blp/mktdata/bbgid/US0378331005").unwrap_err();
//! assert!(matches!(err, ParseError::CommittedSubParseFailed { type_label: "FIGI", .. }));
//! # Ok::<(), ParseError>(())
//! ```

mod combinator;
mod identifier;
mod locator;
mod service;
mod suffix;

pub use identifier::{IdentifierType, SecurityId};
pub use locator::{parse_locator_with, SecurityLocator};
pub use service::{Provider, Scheme, Service};
pub use suffix::{PricingSource, YellowKey, MAX_PRICING_SOURCE_LEN};
