//! CSV output formatting for subnet results.

use crate::processing::SubnetOutcome;
use chrono::{DateTime, Utc};

const CSV_HEADER: &str = "cidr,network,broadcast,mask,wildcard,first_host,last_host,total_hosts,usable_hosts,previous_subnet,next_subnet,error";

/// Quote a field when it holds a comma or double quote.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // Enclose in double quotes and double any quotes inside.
        // No spaces after the comma, excel does not like them.
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_csv_field(f))
        .collect::<Vec<String>>()
        .join(",")
}

/// Render all outcomes as CSV, one row per input.
///
/// The first line is a `#` comment with the generation time.
pub fn render_csv(results: &[SubnetOutcome], generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("# generated {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        CSV_HEADER.to_string(),
    ];

    for (cidr, result) in results {
        let fields = match result {
            Ok(info) => vec![
                info.cidr.to_string(),
                info.network.clone(),
                info.broadcast.clone(),
                info.mask.clone(),
                info.wildcard.clone(),
                info.first_host.clone(),
                info.last_host.clone(),
                info.total_hosts.to_string(),
                info.usable_hosts.to_string(),
                info.previous_subnet.map(|s| s.to_string()).unwrap_or_default(),
                info.next_subnet.map(|s| s.to_string()).unwrap_or_default(),
                String::new(),
            ],
            Err(e) => {
                let mut fields = vec![cidr.clone()];
                fields.extend(std::iter::repeat(String::new()).take(10));
                fields.push(e.to_string());
                fields
            }
        };
        lines.push(csv_row(&fields));
    }

    lines.join("\n")
}

/// Print the CSV rendering to stdout.
pub fn print_csv(results: &[SubnetOutcome]) {
    log::info!("print_csv() {} row(s)", results.len());
    println!("{}", render_csv(results, Utc::now()));
}
