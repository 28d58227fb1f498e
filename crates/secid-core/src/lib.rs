//! # secid-core
//!
//! Validation of Financial Instrument Global Identifiers (FIGI) and parsing
//! of the Bloomberg-style symbology strings that carry them.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`figi`] | FIGI value type, positional grammar, check digit |
//! | [`symbology`] | `//blp/<provider>/bbgid/<FIGI>[@source][ key]` grammar |
//! | [`batch`] | Parallel validation of many inputs |
//! | [`config`] | Parser options |
//! | [`error`] | Closed error taxonomy shared by all layers |
//!
//! ## Quick Start
//!
//! ```rust
//! use secid_core::{parse_locator, validate_figi, ParseError};
//!
//! let figi = validate_figi("BBG000B9XVV8")?;
//! assert_eq!(figi.to_string(), "BBG000B9XVV8");
//!
//! let locator = parse_locator("//blp/mktdata/bbgid/BBG007Z1JW11@BVAL")?;
//! assert_eq!(locator.figi().map(|f| f.as_str()), Some("BBG007Z1JW11"));
//! assert_eq!(locator.pricing_source().map(|p| p.as_str()), Some("BVAL"));
//! # Ok::<(), ParseError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`ParseError`] value naming the violated rule and,
//! where one exists, the offending position:
//!
//! ```rust
//! use secid_core::{validate_figi, ParseError};
//!
//! match validate_figi("BBG000B9XVV7") {
//!     Err(ParseError::InvalidChecksum { expected, found }) => {
//!         assert_eq!((expected, found), (8, '7'));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! Resolution services downstream should accept [`Figi`] rather than raw
//! strings; this crate performs no lookups itself.

pub mod batch;
pub mod config;
pub mod error;
pub mod figi;
pub mod symbology;

pub use batch::{complete_all, parse_all, validate_all, BatchReport};
pub use config::ParserOptions;
pub use error::{FigiComponent, ParseError};
pub use figi::Figi;
pub use symbology::{
    parse_locator_with, IdentifierType, PricingSource, Provider, Scheme, SecurityId,
    SecurityLocator, Service, YellowKey,
};

/// Validates a bare identifier string.
pub fn validate_figi(input: &str) -> Result<Figi, ParseError> {
    Figi::parse(input)
}

/// Parses a symbology string with default [`ParserOptions`].
pub fn parse_locator(input: &str) -> Result<SecurityLocator, ParseError> {
    parse_locator_with(input, &ParserOptions::default())
}
