pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod server;

pub use error::InvalidInputError;
pub use models::SubnetInfo;
pub use processing::{compute_subnet, compute_subnet_with_preview, compute_subnets, SubnetOutcome};

use std::error::Error;

/// Collect CIDR inputs from the command line and an optional file.
///
/// The file holds one CIDR per line; blank lines and `#` comments are skipped.
pub fn read_cidr_inputs(
    args: &[String],
    file: Option<&str>,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut inputs: Vec<String> = args.iter().map(|a| a.trim().to_string()).collect();

    if let Some(file) = file {
        let content = std::fs::read_to_string(file)
            .map_err(|e| format!("Error reading CIDR file {file}: {e}"))?;
        let before = inputs.len();
        inputs.extend(
            content
                .lines()
                .map(|l| l.split('#').next().unwrap_or("").trim())
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
        log::info!("Read {} CIDR(s) from {file}", inputs.len() - before);
    }

    Ok(inputs)
}

/// Fail when any input was rejected, after the results have been printed.
pub fn ensure_all_accepted(results: &[SubnetOutcome]) -> Result<(), Box<dyn Error>> {
    let rejected = results.iter().filter(|(_, r)| r.is_err()).count();
    if rejected > 0 {
        log::warn!("{rejected} of {} input(s) rejected", results.len());
        return Err(format!("{rejected} of {} input(s) rejected", results.len()).into());
    }
    Ok(())
}
