//! Bindings command handler

use anyhow::{Context, Result};
use unrealpy::{build_core_bindings, ProcessRunner, Settings};

/// Handle the bindings command
pub fn handle(settings: &Settings, runner: &dyn ProcessRunner) -> Result<()> {
    let outputs =
        build_core_bindings(settings, runner).context("Failed to build core bindings")?;

    for output in &outputs {
        println!("Generated {}", output.display());
    }
    println!("{} core binding file(s) generated", outputs.len());

    Ok(())
}
