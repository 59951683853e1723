//! Main entry point for propdiff CLI

use clap::Parser;
use propdiff::cli::Cli;
use propdiff::commands::execute_command;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG directives refine the default level
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    // Execute the command
    if let Err(e) = execute_command(cli.command, cli.store.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
