//! Defaults and command line configuration.
//!
//! Every flag can also come from the environment (and so from `.env`, loaded
//! by `dotenv` before parsing).

use clap::{Parser, ValueEnum};

/// Usable hosts listed in a result unless configured otherwise.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;
/// Upper bound for the preview, a /8 has 16M hosts.
pub const MAX_PREVIEW_LIMIT: usize = 1024;
/// log4rs config file read at startup.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Name reported by the stdio tool server.
pub const SERVER_NAME: &str = "Subnet Calculator MCP";
/// The single tool exposed by the stdio tool server.
pub const TOOL_NAME: &str = "subnet_calculator";

/// IPv4 subnet calculator
///
/// Prints network, broadcast, masks, host range and neighbours of each CIDR.
#[derive(Parser, Debug)]
#[command(name = "subnet-calc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CIDR expressions, e.g. 192.168.1.0/24 or 10.0.0.0/255.0.0.0
    #[arg(value_name = "CIDR")]
    pub cidrs: Vec<String>,

    /// Read CIDRs from a file, one per line ('#' starts a comment)
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal, env = "SUBNET_CALC_FORMAT")]
    pub format: OutputFormat,

    /// Number of usable hosts to list per subnet
    #[arg(short, long, default_value_t = DEFAULT_PREVIEW_LIMIT, env = "SUBNET_CALC_PREVIEW")]
    pub preview: usize,

    /// Serve the subnet_calculator tool as JSON-RPC over stdin/stdout
    #[arg(long)]
    pub serve: bool,

    /// log4rs configuration file
    #[arg(long, default_value = DEFAULT_LOG_CONFIG, env = "SUBNET_CALC_LOG_CONFIG")]
    pub log_config: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
}

impl Cli {
    /// Preview limit clamped to [`MAX_PREVIEW_LIMIT`].
    pub fn preview_limit(&self) -> usize {
        if self.preview > MAX_PREVIEW_LIMIT {
            log::warn!(
                "preview {} capped to {MAX_PREVIEW_LIMIT}",
                self.preview
            );
        }
        self.preview.min(MAX_PREVIEW_LIMIT)
    }
}
