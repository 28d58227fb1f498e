use secid_core::{complete_all, Figi};
use serde_json::json;

use crate::envelope::EnvelopeError;
use crate::error::CliError;

use super::{CommandResult, ResultRow};

pub fn run(bases: &[String]) -> Result<CommandResult, CliError> {
    let outcomes = complete_all(bases);
    CommandResult::collect(bases, &outcomes, accept, |input, error| {
        EnvelopeError::from_parse(input, error)
    })
}

fn accept(base: &str, figi: &Figi) -> Result<ResultRow, CliError> {
    let output = json!({
        "check_digit": figi.check_digit(),
        "figi": figi,
    });
    Ok(ResultRow::accepted(base, output, figi.as_str()))
}
