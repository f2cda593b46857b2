//! Output formatting for subnet results.
//!
//! - [`terminal`] - colored key/value blocks
//! - [`json`] - serde_json rendering
//! - [`csv`] - one row per input

mod csv;
mod json;
mod terminal;

pub use csv::{escape_csv_field, print_csv, render_csv};
pub use json::{outcome_to_json, print_json, render_json};
pub use terminal::{format_field, print_terminal, render_error, render_subnet};

use crate::config::OutputFormat;
use crate::processing::SubnetOutcome;
use std::error::Error;

/// Print all outcomes in the requested format.
pub fn print_results(
    results: &[SubnetOutcome],
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Terminal => print_terminal(results),
        OutputFormat::Json => print_json(results)?,
        OutputFormat::Csv => print_csv(results),
    }
    Ok(())
}
