// ABOUTME: Entry point for the dockutil CLI application.
// ABOUTME: Parses arguments, sets up logging, and maps failures to exit codes.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use dockutil::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();
    let result = commands::release(cli.overrides(), cli.deploy, Output::new(mode)).await;

    if let Err(e) = result {
        Output::new(mode).error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
