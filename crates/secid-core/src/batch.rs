//! Parallel validation of independent inputs.
//!
//! Every parse is pure, so inputs are spread over rayon's global pool with
//! no coordination. Results keep the order of the inputs.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::ParserOptions;
use crate::{parse_locator_with, Figi, ParseError, SecurityLocator};

/// Validates every input as a bare FIGI.
pub fn validate_all<S>(inputs: &[S]) -> Vec<Result<Figi, ParseError>>
where
    S: AsRef<str> + Sync,
{
    let results = inputs
        .par_iter()
        .map(|input| Figi::parse(input.as_ref()))
        .collect::<Vec<_>>();

    let report = BatchReport::from_results(&results);
    debug!(total = report.total, invalid = report.invalid, "validated FIGI batch");
    results
}

/// Completes every 11-character base with its check digit.
pub fn complete_all<S>(bases: &[S]) -> Vec<Result<Figi, ParseError>>
where
    S: AsRef<str> + Sync,
{
    let results = bases
        .par_iter()
        .map(|base| Figi::from_base(base.as_ref()))
        .collect::<Vec<_>>();

    let report = BatchReport::from_results(&results);
    debug!(total = report.total, invalid = report.invalid, "completed FIGI base batch");
    results
}

/// Parses every input as a symbology string.
pub fn parse_all<S>(inputs: &[S], options: &ParserOptions) -> Vec<Result<SecurityLocator, ParseError>>
where
    S: AsRef<str> + Sync,
{
    let results = inputs
        .par_iter()
        .map(|input| parse_locator_with(input.as_ref(), options))
        .collect::<Vec<_>>();

    let report = BatchReport::from_results(&results);
    debug!(total = report.total, invalid = report.invalid, "parsed locator batch");
    results
}

/// Valid/invalid counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl BatchReport {
    pub fn from_results<T, E>(results: &[Result<T, E>]) -> Self {
        let valid = results.iter().filter(|result| result.is_ok()).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }

    pub const fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}
