//! Editor build driver.
//!
//! Regenerates the engine's project files and compiles the editor target by
//! running the engine's own scripts, then optionally installs the built core
//! library where the interpreter can import it.

use crate::config::{join_slashed, Settings, CORE_MODULE, EDITOR_TARGET};
use crate::process::{Invocation, ProcessExit, ProcessRunner};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{tool} failed with {exit}")]
    Failed { tool: String, exit: ProcessExit },

    #[error("failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install {}: {source}", .path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `GenerateProjectFiles` script at the engine root
pub fn generate_script(settings: &Settings) -> PathBuf {
    settings
        .engine_root
        .join(format!("GenerateProjectFiles{}", settings.platform.script_ext))
}

/// Platform build script under `Engine/Build/BatchFiles`
pub fn build_script(settings: &Settings) -> PathBuf {
    join_slashed(&settings.batch_files_dir(), settings.platform.build_script)
}

fn run_tool(invocation: &Invocation, runner: &dyn ProcessRunner) -> Result<(), ToolError> {
    tracing::info!(
        "Running {} with args: {:?}",
        invocation.program.display(),
        invocation.args
    );

    let exit = runner.run(invocation).map_err(|source| ToolError::Launch {
        program: invocation.program.clone(),
        source,
    })?;

    if !exit.success() {
        return Err(ToolError::Failed {
            tool: invocation.tool_name(),
            exit,
        });
    }
    Ok(())
}

/// Regenerate the engine's IDE project files
pub fn generate_project_files(
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> Result<(), ToolError> {
    let invocation = Invocation::new(generate_script(settings)).current_dir(&settings.engine_root);
    run_tool(&invocation, runner)
}

/// Compile the editor target for the host platform
pub fn build_editor(settings: &Settings, runner: &dyn ProcessRunner) -> Result<(), ToolError> {
    let invocation = Invocation::new(build_script(settings))
        .args([
            EDITOR_TARGET,
            settings.platform.unreal_name,
            settings.configuration.as_str(),
        ])
        .current_dir(&settings.engine_root);
    run_tool(&invocation, runner)
}

/// Generate project files, then build the editor
pub fn build(settings: &Settings, runner: &dyn ProcessRunner) -> Result<(), ToolError> {
    generate_project_files(settings, runner)?;
    build_editor(settings, runner)
}

/// File name of the core module library produced by an editor build
pub fn editor_library_name(settings: &Settings) -> String {
    let platform = settings.platform;
    if settings.configuration == "Debug" {
        format!(
            "{}-{}-{}-Debug{}",
            EDITOR_TARGET, CORE_MODULE, platform.unreal_name, platform.dynamic_library_ext
        )
    } else {
        format!(
            "{}-{}-{}{}",
            EDITOR_TARGET, CORE_MODULE, platform.unreal_name, platform.dynamic_library_ext
        )
    }
}

/// Rename the built core library to an importable Python extension module.
///
/// Returns the installed path, or `None` when the build produced no library.
pub fn install_python_module(settings: &Settings) -> Result<Option<PathBuf>, ToolError> {
    let binaries = settings.binaries_dir();
    let library = binaries.join(editor_library_name(settings));

    if !library.is_file() {
        tracing::warn!("No editor library at {}, nothing to install", library.display());
        return Ok(None);
    }

    let module = binaries.join(settings.platform.python_module_file);
    if module.exists() {
        fs::remove_file(&module).map_err(|source| ToolError::Install {
            path: module.clone(),
            source,
        })?;
    }
    fs::rename(&library, &module).map_err(|source| ToolError::Install {
        path: module.clone(),
        source,
    })?;

    tracing::info!("Installed {}", module.display());
    Ok(Some(module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_settings;
    use crate::platform::WINDOWS;
    use crate::process::testing::RecordingRunner;

    #[test]
    fn test_scripts_for_mac() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());

        assert_eq!(
            generate_script(&settings),
            settings.engine_root.join("GenerateProjectFiles.sh")
        );
        assert_eq!(
            build_script(&settings),
            settings.engine_root.join("Engine/Build/BatchFiles/Mac/Build.sh")
        );
    }

    #[test]
    fn test_build_runs_both_tools_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let runner = RecordingRunner::succeeding();

        build(&settings, &runner).unwrap();

        assert_eq!(runner.programs(), vec!["GenerateProjectFiles.sh", "Build.sh"]);
        let calls = runner.calls.borrow();
        assert!(calls[0].args.is_empty());
        assert_eq!(calls[1].args, vec!["UE4Editor", "Mac", "Debug"]);
        assert!(calls.iter().all(|c| c.cwd.as_ref() == Some(&settings.engine_root)));
    }

    #[test]
    fn test_generate_failure_stops_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let runner = RecordingRunner::exiting(3);

        let err = build(&settings, &runner).unwrap_err();

        match err {
            ToolError::Failed { tool, exit } => {
                assert_eq!(tool, "GenerateProjectFiles.sh");
                assert_eq!(exit.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_missing_script_is_launch_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());

        let err = build_editor(&settings, &RecordingRunner::missing_tool()).unwrap_err();
        assert!(matches!(err, ToolError::Launch { .. }));
    }

    #[test]
    fn test_editor_library_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        assert_eq!(editor_library_name(&settings), "UE4Editor-UnrealPy-Mac-Debug.dylib");

        let mut settings = settings.with_configuration("Development");
        settings.platform = &WINDOWS;
        assert_eq!(editor_library_name(&settings), "UE4Editor-UnrealPy-Win64.dll");
    }

    #[test]
    fn test_install_python_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let binaries = settings.binaries_dir();
        fs::create_dir_all(&binaries).unwrap();

        assert_eq!(install_python_module(&settings).unwrap(), None);

        fs::write(binaries.join("UE4Editor-UnrealPy-Mac-Debug.dylib"), "new").unwrap();
        fs::write(binaries.join("unreal.so"), "old").unwrap();

        let installed = install_python_module(&settings).unwrap().unwrap();
        assert_eq!(installed, binaries.join("unreal.so"));
        assert_eq!(fs::read_to_string(&installed).unwrap(), "new");
        assert!(!binaries.join("UE4Editor-UnrealPy-Mac-Debug.dylib").exists());
    }
}
