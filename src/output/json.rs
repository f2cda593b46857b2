//! JSON output.

use crate::processing::SubnetOutcome;
use serde_json::{json, Value};
use std::error::Error;

/// JSON value of one outcome, rejections become `{"cidr", "error"}`.
pub fn outcome_to_json(outcome: &SubnetOutcome) -> Result<Value, serde_json::Error> {
    let (cidr, result) = outcome;
    match result {
        Ok(info) => serde_json::to_value(info),
        Err(e) => Ok(json!({ "cidr": cidr, "error": e.to_string() })),
    }
}

/// Pretty JSON, a single object for one input and an array otherwise.
pub fn render_json(results: &[SubnetOutcome]) -> Result<String, Box<dyn Error>> {
    let mut values = results
        .iter()
        .map(outcome_to_json)
        .collect::<Result<Vec<Value>, _>>()?;

    let value = if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Print the JSON rendering to stdout.
pub fn print_json(results: &[SubnetOutcome]) -> Result<(), Box<dyn Error>> {
    println!("{}", render_json(results)?);
    Ok(())
}
