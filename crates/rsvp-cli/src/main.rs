//! RSVP tracker CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use rsvp_cli::cli::{Cli, Commands, OutputFormat};
use rsvp_cli::commands;

fn main() {
    // Load .env.local if it exists (for RSVP_DATA_DIR, RSVP_USER etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir();
    let user = cli.user();

    // No command = list upcoming events
    let command = cli.command.unwrap_or(Commands::List {
        search: None,
        category: None,
        all: false,
        format: OutputFormat::Table,
    });

    if let Err(e) = commands::execute(command, &data_dir, user) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
