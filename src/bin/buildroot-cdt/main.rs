//! buildroot-cdt CLI - Eclipse CDT descriptors for Buildroot toolchains

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

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
        EnvFilter::new("buildroot_cdt=debug")
    } else {
        EnvFilter::new("buildroot_cdt=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Configuration is only loaded by commands that read the manifest
    let Cli {
        command,
        manifest,
        config,
        no_color,
        ..
    } = cli;
    let context = || commands::Context::load(manifest, config.as_deref(), !no_color);

    // Execute command
    match command {
        Commands::List(args) => commands::list::execute(args, &context()?),
        Commands::Generate(args) => commands::generate::execute(args, &context()?),
        Commands::Register(args) => commands::register::execute(args, &context()?),
        Commands::Env(args) => commands::env::execute(args, &context()?),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
