use clap::Parser;
use std::error::Error;
use subnet_calc::config::Cli;
use subnet_calc::logging::init_logging;
use subnet_calc::output::print_results;
use subnet_calc::server::{serve_stdio, ToolServer};
use subnet_calc::{compute_subnets, ensure_all_accepted, read_cidr_inputs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_config)?;
    //
    log::info!("#Start main()");

    let preview_limit = cli.preview_limit();

    if cli.serve {
        serve_stdio(ToolServer::new(preview_limit)).await?;
        return Ok(());
    }

    let inputs = read_cidr_inputs(&cli.cidrs, cli.file.as_deref())?;
    if inputs.is_empty() {
        return Err("No CIDR given, pass one or more CIDRs or --file <PATH>".into());
    }

    let results = compute_subnets(&inputs, preview_limit);
    print_results(&results, cli.format)?;

    // Any rejected input makes the exit status non-zero.
    ensure_all_accepted(&results)
}
