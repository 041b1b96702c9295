//! camscout - Command-line WS-Discovery scanner for ONVIF cameras.
//!
//! Multicasts a WS-Discovery probe on a chosen interface and prints the
//! network video devices that answer.

mod cli;
mod commands;
mod error;
mod net;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Discover(args) => commands::run_discover(args, cli.json).await,
        Commands::Interfaces => commands::run_interfaces(cli.json),
    }
}
