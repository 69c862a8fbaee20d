//! Editor module descriptors and the per-module build steps.
//!
//! A [`ModuleDescriptor`] is derived from a dotted identifier such as
//! `unreal.asset_registry`. Nested editor modules are not supported: every
//! descriptor maps to one flat module directory under `Engine/Source/Editor`.

use crate::config::{join_slashed, Settings};
use crate::marker::{self, MarkerError};
use crate::naming::{generated_module_name, split_identifier, title_case};
use crate::process::ProcessRunner;
use crate::template::{pch_contents, rules_file_name};
use crate::transpile::{self, TranspileError, OUTPUT_EXT};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("invalid module identifier {0:?}")]
    InvalidName(String),

    #[error(
        "expected to find source file at {} or {}",
        .primary.display(),
        .secondary.display()
    )]
    SourceNotFound { primary: PathBuf, secondary: PathBuf },

    #[error("build rules template not found at {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error(transparent)]
    Transpile(#[from] TranspileError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// All names and paths derived from one dotted module identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    /// Identifier as given, e.g. `unreal.asset_registry`
    pub identifier: String,
    /// Last dotted component
    pub name: String,
    /// Remaining components joined with `/`
    pub path: String,
    /// Editor module name, e.g. `UnrealPy_Unreal_Asset_Registry`
    pub generated_name: String,
    pub module_dir: PathBuf,
    pub private_dir: PathBuf,
    /// Precompiled header, relative to `module_dir`
    pub pch: String,
    /// Library left next to the sources by earlier builds
    pub library_file: PathBuf,
    pub transpiled_output: PathBuf,
    /// Flat then nested source location, in search order
    pub source_candidates: [PathBuf; 2],
    pub template_file: PathBuf,
    pub build_file: PathBuf,
    pub target_file: PathBuf,
}

impl ModuleDescriptor {
    pub fn new(identifier: &str, settings: &Settings) -> Result<Self, ModuleError> {
        if identifier.is_empty() || identifier.split('.').any(str::is_empty) {
            return Err(ModuleError::InvalidName(identifier.to_string()));
        }

        let (path, name) = split_identifier(identifier);
        let generated_name = generated_module_name(&path, name);

        let module_dir = settings.editor_source_dir().join(&generated_name);
        let private_dir = module_dir.join("Private");
        let pch = format!("Private/{}PrivatePCH.h", generated_name);
        let transpiled_output =
            private_dir.join(format!("{}.{}", title_case(name), OUTPUT_EXT));

        let source_dir = settings.project_path(&path);
        let source_file = format!("{}.{}", name, settings.source_ext);
        let source_candidates = [
            source_dir.join(&source_file),
            source_dir.join(name).join(&source_file),
        ];
        let library_file =
            source_dir.join(format!("{}{}", name, settings.platform.dynamic_library_ext));

        let rules_file = rules_file_name(&generated_name);

        Ok(ModuleDescriptor {
            identifier: identifier.to_string(),
            name: name.to_string(),
            path,
            template_file: settings.templates_dir().join(&rules_file),
            build_file: module_dir.join(&rules_file),
            target_file: settings.target_file(),
            generated_name,
            module_dir,
            private_dir,
            pch,
            library_file,
            transpiled_output,
            source_candidates,
        })
    }

    /// Absolute path of the precompiled header
    pub fn pch_file(&self) -> PathBuf {
        join_slashed(&self.module_dir, &self.pch)
    }

    /// First existing source candidate
    pub fn locate_source(&self) -> Result<&Path, ModuleError> {
        self.source_candidates
            .iter()
            .find(|p| p.is_file())
            .map(PathBuf::as_path)
            .ok_or_else(|| ModuleError::SourceNotFound {
                primary: self.source_candidates[0].clone(),
                secondary: self.source_candidates[1].clone(),
            })
    }

    /// Remove the generated module directory and any stale library.
    ///
    /// Absent files are not an error.
    pub fn clean(&self) -> Result<(), ModuleError> {
        if self.module_dir.exists() {
            tracing::debug!("Removing {}", self.module_dir.display());
            fs::remove_dir_all(&self.module_dir).map_err(|e| io_error(&self.module_dir, e))?;
        }
        if self.library_file.exists() {
            tracing::debug!("Removing {}", self.library_file.display());
            fs::remove_file(&self.library_file).map_err(|e| io_error(&self.library_file, e))?;
        }
        Ok(())
    }

    /// Transpile the module source into the module's private directory
    pub fn emit_source(
        &self,
        transpiler: &str,
        runner: &dyn ProcessRunner,
    ) -> Result<(), ModuleError> {
        let source = self.locate_source()?;

        fs::create_dir_all(&self.private_dir).map_err(|e| io_error(&self.private_dir, e))?;

        tracing::info!(
            "Transpiling {} -> {}",
            source.display(),
            self.transpiled_output.display()
        );
        transpile::transpile(transpiler, source, &self.transpiled_output, true, runner)?;
        transpile::prepend_pch_include(&self.transpiled_output, &self.pch)?;

        Ok(())
    }

    /// Install build rules, register with the editor target, and write the PCH
    pub fn register_with_build_system(&self) -> Result<(), ModuleError> {
        if !self.template_file.is_file() {
            return Err(ModuleError::TemplateNotFound(self.template_file.clone()));
        }

        fs::create_dir_all(&self.module_dir).map_err(|e| io_error(&self.module_dir, e))?;
        fs::copy(&self.template_file, &self.build_file)
            .map_err(|e| io_error(&self.build_file, e))?;

        if marker::register_in_file(&self.target_file, &self.generated_name)? {
            tracing::info!("Registered {} with the editor target", self.generated_name);
        }

        let pch_file = self.pch_file();
        if let Some(parent) = pch_file.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(&pch_file, pch_contents()).map_err(|e| io_error(&pch_file, e))?;

        Ok(())
    }

    /// Clean, transpile and register, stopping at the first failure
    pub fn build(
        &self,
        settings: &Settings,
        runner: &dyn ProcessRunner,
    ) -> Result<(), ModuleError> {
        tracing::info!("Building module {} ({})", self.identifier, self.generated_name);

        self.clean()?;
        self.emit_source(&settings.transpiler, runner)?;
        self.register_with_build_system()
    }
}

fn io_error(path: &Path, source: io::Error) -> ModuleError {
    ModuleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_settings;
    use crate::marker::{END_MARKER, START_MARKER};
    use crate::process::testing::{fake_transpiler, RecordingRunner};
    use crate::template::BuildRules;

    const TRANSPILED: &str = "/* Generated by Cython 0.23.4 */\n\nint module_init(void);\n";

    struct Fixture {
        _temp_dir: tempfile::TempDir,
        settings: Settings,
    }

    /// Engine tree with a marked target file plus a project with one source
    fn fixture(identifier: &str) -> (Fixture, ModuleDescriptor) {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let module = ModuleDescriptor::new(identifier, &settings).unwrap();

        let target = settings.target_file();
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(
            &target,
            format!("class T {{\n// {}\n// {}\n}}\n", START_MARKER, END_MARKER),
        )
        .unwrap();

        fs::create_dir_all(module.source_candidates[0].parent().unwrap()).unwrap();
        fs::write(&module.source_candidates[0], "def f(): pass\n").unwrap();

        fs::create_dir_all(settings.templates_dir()).unwrap();
        fs::write(&module.template_file, "// rules\n").unwrap();

        (
            Fixture {
                _temp_dir: temp_dir,
                settings,
            },
            module,
        )
    }

    #[test]
    fn test_descriptor_for_nested_package() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path()).with_source_ext("src");
        let module = ModuleDescriptor::new("a.b.asset_registry", &settings).unwrap();

        assert_eq!(module.name, "asset_registry");
        assert_eq!(module.path, "a/b");
        assert_eq!(module.generated_name, "UnrealPy_B_Asset_Registry");
        assert_eq!(module.pch, "Private/UnrealPy_B_Asset_RegistryPrivatePCH.h");

        let project = &settings.project_dir;
        let relative: Vec<&Path> = module
            .source_candidates
            .iter()
            .map(|p| p.strip_prefix(project).unwrap())
            .collect();
        assert_eq!(
            relative,
            vec![
                Path::new("a/b/asset_registry.src"),
                Path::new("a/b/asset_registry/asset_registry.src"),
            ]
        );

        assert_eq!(
            module.transpiled_output,
            settings
                .editor_source_dir()
                .join("UnrealPy_B_Asset_Registry/Private/Asset_Registry.cpp")
        );
        assert_eq!(module.library_file, project.join("a/b/asset_registry.dylib"));
        assert!(module
            .build_file
            .ends_with("UnrealPy_B_Asset_Registry/UnrealPy_B_Asset_Registry.Build.cs"));
        assert_eq!(
            module.template_file,
            project.join("Modules/UnrealPy_B_Asset_Registry.Build.cs")
        );
    }

    #[test]
    fn test_rules_files_match_build_rules() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let module = ModuleDescriptor::new("unreal.math", &settings).unwrap();
        let expected = BuildRules::new(&module.generated_name, &settings).file_name();

        assert_eq!(module.build_file.file_name().unwrap(), expected.as_str());
        assert_eq!(module.template_file.file_name().unwrap(), expected.as_str());
    }

    #[test]
    fn test_descriptor_for_bare_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        let module = ModuleDescriptor::new("math", &settings).unwrap();

        assert_eq!(module.path, "");
        assert_eq!(module.generated_name, "UnrealPy__Math");
        assert_eq!(module.source_candidates[0], settings.project_dir.join("math.pyx"));
    }

    #[test]
    fn test_descriptors_from_same_name_are_equal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        assert_eq!(
            ModuleDescriptor::new("unreal.math", &settings).unwrap(),
            ModuleDescriptor::new("unreal.math", &settings).unwrap()
        );
    }

    #[test]
    fn test_invalid_identifiers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = test_settings(temp_dir.path());
        for identifier in ["", "a..b", ".a", "a."] {
            assert!(matches!(
                ModuleDescriptor::new(identifier, &settings),
                Err(ModuleError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_locate_source_prefers_flat_layout() {
        let (fx, module) = fixture("unreal.math");
        let nested = &module.source_candidates[1];
        fs::create_dir_all(nested.parent().unwrap()).unwrap();
        fs::write(nested, "").unwrap();

        assert_eq!(module.locate_source().unwrap(), module.source_candidates[0]);

        fs::remove_file(&module.source_candidates[0]).unwrap();
        assert_eq!(module.locate_source().unwrap(), module.source_candidates[1]);
        drop(fx);
    }

    #[test]
    fn test_locate_source_missing_lists_both() {
        let (_fx, module) = fixture("unreal.math");
        fs::remove_file(&module.source_candidates[0]).unwrap();

        let err = module.locate_source().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("math.pyx"));
        assert!(message.contains(&module.source_candidates[1].display().to_string()));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let (_fx, module) = fixture("unreal.math");
        fs::create_dir_all(&module.private_dir).unwrap();
        fs::write(&module.transpiled_output, "x").unwrap();
        fs::write(&module.library_file, "lib").unwrap();

        module.clean().unwrap();
        assert!(!module.module_dir.exists());
        assert!(!module.library_file.exists());

        module.clean().unwrap();
    }

    #[test]
    fn test_emit_source_prepends_pch_include() {
        let (_fx, module) = fixture("unreal.math");
        let runner = fake_transpiler(TRANSPILED);

        module.emit_source("cython", &runner).unwrap();

        let output = fs::read_to_string(&module.transpiled_output).unwrap();
        assert_eq!(
            output,
            format!(
                "\n#include \"Private/UnrealPy_Unreal_MathPrivatePCH.h\"\n\n{}",
                TRANSPILED
            )
        );

        let calls = runner.calls.borrow();
        assert_eq!(calls[0].args[0], "--verbose");
        assert_eq!(calls[0].args.last().unwrap(), module.source_candidates[0].as_os_str());
    }

    #[test]
    fn test_emit_source_transpiler_failure() {
        let (_fx, module) = fixture("unreal.math");
        let err = module
            .emit_source("cython", &RecordingRunner::exiting(1))
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::Transpile(TranspileError::Failed { .. })
        ));
    }

    #[test]
    fn test_emit_source_tool_not_found() {
        let (_fx, module) = fixture("unreal.math");
        let err = module
            .emit_source("cython", &RecordingRunner::missing_tool())
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::Transpile(TranspileError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn test_register_requires_template() {
        let (_fx, module) = fixture("unreal.math");
        fs::remove_file(&module.template_file).unwrap();

        let err = module.register_with_build_system().unwrap_err();
        assert!(matches!(err, ModuleError::TemplateNotFound(p) if p == module.template_file));
    }

    #[test]
    fn test_build_end_to_end() {
        let (fx, module) = fixture("unreal.math");
        let runner = fake_transpiler(TRANSPILED);

        module.build(&fx.settings, &runner).unwrap();

        assert_eq!(fs::read_to_string(&module.build_file).unwrap(), "// rules\n");
        assert_eq!(fs::read_to_string(module.pch_file()).unwrap(), pch_contents());
        assert!(fs::read_to_string(&module.transpiled_output)
            .unwrap()
            .ends_with(TRANSPILED));

        let target = fs::read_to_string(&module.target_file).unwrap();
        assert!(target.contains("OutExtraModuleNames.Add(\"UnrealPy_Unreal_Math\");"));
        assert_eq!(runner.programs(), vec!["cython"]);
    }

    #[test]
    fn test_build_stops_at_first_failure() {
        let (fx, module) = fixture("unreal.math");
        let original_target = fs::read_to_string(&module.target_file).unwrap();

        let err = module
            .build(&fx.settings, &RecordingRunner::exiting(2))
            .unwrap_err();

        assert!(matches!(err, ModuleError::Transpile(_)));
        assert!(!module.build_file.exists());
        assert_eq!(fs::read_to_string(&module.target_file).unwrap(), original_target);
    }
}
