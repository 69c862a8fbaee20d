//! Engine command handler
//!
//! Drives the engine's project generator and editor build.

use anyhow::{Context, Result};
use unrealpy::{engine, ProcessRunner, Settings};

/// Handle the engine command
///
/// # Arguments
/// * `generate_only` - Stop after regenerating project files
/// * `install` - Install the built core library as a Python module
pub fn handle(
    settings: &Settings,
    generate_only: bool,
    install: bool,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    engine::generate_project_files(settings, runner)
        .context("Generate Unreal project files failed")?;

    if generate_only {
        return Ok(());
    }

    engine::build_editor(settings, runner).context("Unreal build failed")?;
    println!(
        "Built {} for {} ({})",
        unrealpy::config::EDITOR_TARGET,
        settings.platform.unreal_name,
        settings.configuration
    );

    if install {
        match engine::install_python_module(settings)? {
            Some(path) => println!("Installed {}", path.display()),
            None => println!("No editor library found to install"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{settings, FakeToolchain};

    #[test]
    fn test_generate_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        let runner = FakeToolchain::default();

        handle(&settings, true, false, &runner).unwrap();
        assert_eq!(*runner.programs.borrow(), vec!["GenerateProjectFiles.sh"]);
    }

    #[test]
    fn test_build_failure_message() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        let runner = FakeToolchain {
            fail_tool: Some("Build.sh"),
            ..Default::default()
        };

        let err = handle(&settings, false, false, &runner).unwrap_err();
        assert_eq!(err.to_string(), "Unreal build failed");
        assert!(format!("{:#}", err).contains("exit code 1"));
    }

    #[test]
    fn test_install_after_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings(temp_dir.path());
        let binaries = settings.binaries_dir();
        std::fs::create_dir_all(&binaries).unwrap();
        std::fs::write(binaries.join("UE4Editor-UnrealPy-Mac-Debug.dylib"), "lib").unwrap();

        handle(&settings, false, true, &FakeToolchain::default()).unwrap();
        assert!(binaries.join("unreal.so").exists());
    }
}
