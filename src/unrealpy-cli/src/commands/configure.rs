//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up unrealpy CLI defaults.

use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
///
/// # Arguments
/// * `transpiler` - Optional transpiler executable to set as default
/// * `configuration` - Optional editor build configuration to set as default
/// * `show` - If true, show current configuration
pub fn handle(transpiler: Option<String>, configuration: Option<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if transpiler.is_none() && configuration.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, transpiler, configuration);
    config.save()?;

    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

fn apply(config: &mut Config, transpiler: Option<String>, configuration: Option<String>) {
    if let Some(transpiler) = transpiler {
        config.set_transpiler(transpiler);
    }
    if let Some(configuration) = configuration {
        config.set_configuration(configuration);
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    println!(
        "Transpiler: {}",
        config
            .get_transpiler()
            .unwrap_or(unrealpy::config::DEFAULT_TRANSPILER)
    );
    println!(
        "Configuration: {}",
        config
            .get_configuration()
            .unwrap_or(unrealpy::config::DEFAULT_CONFIGURATION)
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: unrealpy configure --transpiler cython --configuration Debug");
    println!("   or: unrealpy configure --show");
    println!();
    println!("Note: UE_PATH and PYTHON_BASE must still be set (or passed as");
    println!("      --engine-root / --python-root) for every build command.");
}
