use secid_core::{parse_all, ParserOptions, SecurityLocator};
use serde_json::json;

use crate::envelope::EnvelopeError;
use crate::error::CliError;

use super::{CommandResult, ResultRow};

pub fn run(inputs: &[String], options: &ParserOptions) -> Result<CommandResult, CliError> {
    let outcomes = parse_all(inputs, options);

    let warnings = inputs
        .iter()
        .zip(&outcomes)
        .filter_map(|(input, outcome)| match outcome {
            Ok(locator) if locator.service().is_none() => {
                Some(format!("'{input}' has no service prefix"))
            }
            _ => None,
        })
        .collect();

    let result = CommandResult::collect(inputs, &outcomes, accept, |input, error| {
        EnvelopeError::from_parse(input, error)
    })?;
    Ok(result.with_warnings(warnings))
}

fn accept(input: &str, locator: &SecurityLocator) -> Result<ResultRow, CliError> {
    let canonical = locator.to_string();
    let output = json!({
        "canonical": canonical,
        "locator": serde_json::to_value(locator)?,
    });
    Ok(ResultRow::accepted(input, output, canonical))
}
