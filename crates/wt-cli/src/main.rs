use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use wt_cli::commands::show::ShowOptions;
use wt_cli::commands::{add, show};
use wt_cli::{Cli, Commands, Config, uptime};
use wt_store::Store;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // stdout carries command output only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let store = Store::new(&config.log_path);

    match command {
        Commands::Add {
            time,
            uptime: use_uptime,
        } => {
            let minutes =
                add::resolve_minutes(time.as_deref(), *use_uptime, uptime::uptime_minutes)?;
            add::run(&mut io::stdout(), &store, minutes, &Local::now())?;
        }
        Commands::Show { full, json } => {
            let log = store
                .load()
                .with_context(|| format!("failed to load {}", store.path().display()))?;
            let options = ShowOptions {
                full: *full,
                json: *json,
                required_minutes_per_day: config.required_minutes_per_day,
            };
            show::run(&mut io::stdout(), &log, &options, &Local)?;
        }
    }

    Ok(())
}
