//! Clean and sweep command handlers
//!
//! Removes everything earlier builds generated: registrations in the editor
//! target, per-module directories, and transpiled sources.

use anyhow::{Context, Result};
use std::path::Path;
use unrealpy::{marker, sweep, ModuleDescriptor, Settings, SweepReport};

/// Handle the clean command
pub fn handle(settings: &Settings, modules: &[String]) -> Result<()> {
    let target = settings.target_file();
    let removed = marker::clear_file(&target)
        .with_context(|| format!("Failed to clear registrations in {}", target.display()))?;
    println!("Removed {} registration(s) from {}", removed, target.display());

    for identifier in modules {
        let module = ModuleDescriptor::new(identifier, settings)?;
        module
            .clean()
            .with_context(|| format!("Failed to clean module {}", identifier))?;
        println!("Cleaned {} ({})", identifier, module.module_dir.display());
    }

    handle_sweep(settings, None)
}

/// Handle the sweep command
///
/// # Arguments
/// * `root` - Directory to sweep; defaults to the core module's private directory
pub fn handle_sweep(settings: &Settings, root: Option<&Path>) -> Result<()> {
    let default_root = settings.core_private_dir();
    let root = root.unwrap_or(&default_root);

    let report = sweep(root).with_context(|| format!("Failed to sweep {}", root.display()))?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &SweepReport) {
    if report.is_empty() {
        println!("Nothing to sweep");
        return;
    }

    for file in &report.files_removed {
        println!("Cleaning {}", file.display());
    }
    for dir in &report.dirs_removed {
        println!("Removed empty dir {}", dir.display());
    }
}
