//! mf CLI Binary
//!
//! Command-line interface for generating MTA deployment and extension descriptors.

use clap::Parser;
use mta_forge::cli::{map_error, resolve_config, Cli, RunContext};
use mta_forge::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Config errors are reported before logging exists.
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(
        verbose = cli.verbose,
        local = cli.local,
        expand_source = cli.expand_source,
        "mta-forge starting"
    );

    let context = RunContext::new(config);
    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
