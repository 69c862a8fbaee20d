mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::EnvFilter;
use unrealpy::{Settings, SystemRunner};

use cli::*;

/// Log to stderr, honouring RUST_LOG when set
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "unrealpy=debug"
    } else {
        "unrealpy=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    // Only configure may run without the engine and interpreter roots
    let settings = || -> Result<Settings> { cli.global.settings(&Config::load()?) };
    let runner = SystemRunner;

    match cli.command {
        Commands::Configure { show } => {
            commands::configure::handle(
                cli.global.transpiler.clone(),
                cli.global.configuration.clone(),
                show,
            )?;
        }

        Commands::Build {
            modules,
            no_engine,
            install,
        } => {
            commands::build::handle(&settings()?, &modules, no_engine, install, &runner)?;
        }

        Commands::Clean { modules } => {
            commands::clean::handle(&settings()?, &modules)?;
        }

        Commands::Sweep { root } => {
            commands::clean::handle_sweep(&settings()?, root.as_deref())?;
        }

        Commands::Bindings => {
            commands::bindings::handle(&settings()?, &runner)?;
        }

        Commands::Scaffold { module, force } => {
            commands::scaffold::handle(&settings()?, &module, force)?;
        }

        Commands::Describe { module, json } => {
            commands::describe::handle(&settings()?, &module, json)?;
        }

        Commands::Engine {
            generate_only,
            install,
        } => {
            commands::engine::handle(&settings()?, generate_only, install, &runner)?;
        }
    }

    Ok(())
}
