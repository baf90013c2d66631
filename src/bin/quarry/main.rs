//! Quarry CLI - fetch, build, and package the Fossil Threads C library

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use quarry::util::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("quarry=debug")
    } else {
        EnvFilter::new("quarry=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Execute command
    match cli.command {
        Commands::Create(args) => commands::create::execute(args, &shell),
        Commands::Source(args) => commands::source::execute(args, &shell),
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Package(args) => commands::package::execute(args, &shell),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
