use secid_core::{validate_all, Figi};
use serde_json::json;

use crate::envelope::EnvelopeError;
use crate::error::CliError;

use super::{CommandResult, ResultRow};

pub fn run(inputs: &[String]) -> Result<CommandResult, CliError> {
    let outcomes = validate_all(inputs);
    CommandResult::collect(inputs, &outcomes, accept, |input, error| {
        EnvelopeError::from_parse(input, error)
    })
}

fn accept(input: &str, figi: &Figi) -> Result<ResultRow, CliError> {
    let output = json!({
        "figi": figi,
        "prefix": figi.prefix(),
        "random_part": figi.random_part(),
        "check_digit": figi.check_digit(),
    });
    Ok(ResultRow::accepted(input, output, figi.as_str()))
}
