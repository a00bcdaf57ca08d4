use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod command;
mod config;
mod engines;
mod login;
mod runtime;
mod server;
mod session;

use cli::{Cli, Commands};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_cli(&cli)?;

    let registry = engines::load_extensions(&config.engines_file)
        .context("Failed to load engine registry")?;
    runtime::install(registry, config.json_options);

    match cli.command {
        Some(Commands::Serve { bind, open }) => {
            let config = config.with_bind(bind.as_deref())?;
            command::run_serve(config, open).await?;
        }
        Some(Commands::Engines { kind }) => {
            command::run_engines(&kind)?;
        }
        Some(Commands::Options {
            kind,
            client,
            model,
            defaults,
        }) => {
            command::run_options(&kind, &client, &model, defaults)?;
        }
        Some(Commands::Login { user }) => {
            command::run_login(&config, &user)?;
        }
        Some(Commands::Logout) => {
            command::run_logout(&config)?;
        }
        Some(Commands::Status) => {
            command::run_status(&config)?;
        }
        None => {
            // No command specified, show help
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Use 'scoopika serve' to start the login page or 'scoopika engines --type text' to list engines.");
        }
    }

    Ok(())
}
