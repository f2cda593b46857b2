//! Terminal output with colors.

use crate::error::InvalidInputError;
use crate::models::SubnetInfo;
use crate::processing::SubnetOutcome;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

const LABEL_WIDTH: usize = 18;

fn row(label: &str, value: impl ToString) -> String {
    format!("{}  {}\n", format_field(label, LABEL_WIDTH), value.to_string())
}

fn or_none(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
}

/// Render one result as a labelled block.
pub fn render_subnet(info: &SubnetInfo) -> String {
    let mut out = format!("== {} ==\n", info.cidr.to_string().bold());
    out += &row("network", info.network.green());
    out += &row("broadcast", info.broadcast.green());
    out += &row("mask", &info.mask);
    out += &row("wildcard", &info.wildcard);
    out += &row("prefix_length", info.prefix_length);
    out += &row("host_bits", info.host_bits);
    out += &row("first_host", &info.first_host);
    out += &row("last_host", &info.last_host);
    out += &row("total_hosts", info.total_hosts);
    out += &row("usable_hosts", info.usable_hosts.to_string().yellow());
    out += &row("previous_subnet", or_none(info.previous_subnet));
    out += &row("next_subnet", or_none(info.next_subnet));
    out += &row("class", info.classification.labels().join(","));
    out += &row("preview", info.usable_hosts_preview.iter().join(", "));
    out += &format!("{}\n", info.summary.italic());
    out
}

/// Render a rejected input.
pub fn render_error(cidr: &str, err: &InvalidInputError) -> String {
    format!("== {} ==\n{} {}\n", cidr.bold(), "ERROR".on_red(), err)
}

/// Print every outcome to stdout.
pub fn print_terminal(results: &[SubnetOutcome]) {
    log::info!("print_terminal() {} result(s)", results.len());
    for (cidr, result) in results {
        match result {
            Ok(info) => println!("{}", render_subnet(info)),
            Err(e) => println!("{}", render_error(cidr, e)),
        }
    }
}
