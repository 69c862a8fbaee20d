//! Describe command handler

use anyhow::{Context, Result};
use unrealpy::{ModuleDescriptor, Settings};

/// Handle the describe command
pub fn handle(settings: &Settings, identifier: &str, json: bool) -> Result<()> {
    let module = ModuleDescriptor::new(identifier, settings)?;

    if json {
        let out = serde_json::to_string_pretty(&module).context("Failed to serialize module")?;
        println!("{}", out);
    } else {
        print!("{}", format_text(&module));
    }

    Ok(())
}

fn format_text(module: &ModuleDescriptor) -> String {
    let rows = [
        ("Module", module.identifier.clone()),
        ("Name", module.name.clone()),
        ("Path", module.path.clone()),
        ("Generated name", module.generated_name.clone()),
        ("Module dir", module.module_dir.display().to_string()),
        ("PCH", module.pch.clone()),
        ("Source (flat)", module.source_candidates[0].display().to_string()),
        ("Source (nested)", module.source_candidates[1].display().to_string()),
        ("Output", module.transpiled_output.display().to_string()),
        ("Library", module.library_file.display().to_string()),
        ("Template", module.template_file.display().to_string()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<16} {}\n", format!("{}:", label), value))
        .collect()
}
