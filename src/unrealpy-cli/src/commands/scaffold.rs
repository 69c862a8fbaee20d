//! Scaffold command handler
//!
//! Writes the build rules template a module build copies into the engine.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use unrealpy::{BuildRules, ModuleDescriptor, Settings};

/// Handle the scaffold command
///
/// # Arguments
/// * `identifier` - Dotted module name
/// * `force` - Overwrite an existing template
pub fn handle(settings: &Settings, identifier: &str, force: bool) -> Result<PathBuf> {
    let module = ModuleDescriptor::new(identifier, settings)?;
    let template = &module.template_file;

    if template.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            template.display()
        );
    }

    if let Some(parent) = template.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let rules = BuildRules::new(&module.generated_name, settings);
    fs::write(template, rules.render())
        .with_context(|| format!("Failed to write {}", template.display()))?;

    println!("Wrote {}", template.display());
    Ok(template.clone())
}
