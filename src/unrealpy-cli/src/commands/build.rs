//! Build command handler
//!
//! Runs the whole pipeline: clear previous registrations, build each module,
//! then regenerate project files and build the editor.

use anyhow::{Context, Result};
use unrealpy::{marker, ModuleDescriptor, ProcessRunner, Settings};

/// Clear the registration region, then build each module in order
pub fn build_modules(
    settings: &Settings,
    modules: &[String],
    runner: &dyn ProcessRunner,
) -> Result<Vec<ModuleDescriptor>> {
    let target = settings.target_file();
    let removed = marker::clear_file(&target)
        .with_context(|| format!("Failed to clear registrations in {}", target.display()))?;
    tracing::info!("Cleared {} previous registration(s)", removed);

    let mut built = Vec::with_capacity(modules.len());
    for identifier in modules {
        let module = ModuleDescriptor::new(identifier, settings)?;
        module
            .build(settings, runner)
            .with_context(|| format!("Failed to build module {}", identifier))?;
        println!("Built {} ({})", identifier, module.generated_name);
        built.push(module);
    }

    Ok(built)
}

/// Handle the build command
pub fn handle(
    settings: &Settings,
    modules: &[String],
    no_engine: bool,
    install: bool,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    build_modules(settings, modules, runner)?;

    if no_engine {
        return Ok(());
    }

    super::engine::handle(settings, false, install, runner)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{settings, FakeToolchain};
    use std::fs;

    fn add_module(settings: &Settings, identifier: &str) -> ModuleDescriptor {
        let module = ModuleDescriptor::new(identifier, settings).unwrap();
        let source = &module.source_candidates[0];
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(source, "").unwrap();
        fs::create_dir_all(settings.templates_dir()).unwrap();
        fs::write(&module.template_file, "// rules\n").unwrap();
        module
    }

    #[test]
    fn test_build_pipeline_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        add_module(&settings, "unreal.asset_registry");
        let runner = FakeToolchain::default();

        handle(
            &settings,
            &["unreal.asset_registry".to_string()],
            false,
            false,
            &runner,
        )
        .unwrap();

        assert_eq!(
            *runner.programs.borrow(),
            vec!["cython", "GenerateProjectFiles.sh", "Build.sh"]
        );
    }

    #[test]
    fn test_rebuild_replaces_previous_registrations() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        add_module(&settings, "unreal.math");
        add_module(&settings, "unreal.asset_registry");
        let runner = FakeToolchain::default();
        let modules = ["unreal.math".to_string(), "unreal.asset_registry".to_string()];

        build_modules(&settings, &modules, &runner).unwrap();
        build_modules(&settings, &modules, &runner).unwrap();

        let target = fs::read_to_string(settings.target_file()).unwrap();
        assert_eq!(
            target,
            "{\n// @UNREALPY@\n\
             OutExtraModuleNames.Add(\"UnrealPy_Unreal_Asset_Registry\");\n\
             OutExtraModuleNames.Add(\"UnrealPy_Unreal_Math\");\n\
             // @/UNREALPY@\n}\n"
        );
    }

    #[test]
    fn test_module_failure_skips_engine() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        add_module(&settings, "unreal.math");
        let runner = FakeToolchain {
            fail_tool: Some("cython"),
            ..Default::default()
        };

        let err = handle(&settings, &["unreal.math".to_string()], false, false, &runner)
            .unwrap_err();

        assert!(err.to_string().contains("unreal.math"));
        assert_eq!(*runner.programs.borrow(), vec!["cython"]);
    }

    #[test]
    fn test_missing_markers_abort_before_building() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        fs::write(settings.target_file(), "no markers\n").unwrap();
        let runner = FakeToolchain::default();

        assert!(build_modules(&settings, &["unreal.math".to_string()], &runner).is_err());
        assert!(runner.programs.borrow().is_empty());
    }
}
