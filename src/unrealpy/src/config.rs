//! Build settings shared by every step.
//!
//! A [`Settings`] value is built once at startup and passed by reference to
//! each operation; nothing reads the environment after that.

use crate::platform::{Platform, PlatformError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the Unreal Engine root directory
pub const ENGINE_ROOT_VAR: &str = "UE_PATH";

/// Environment variable naming the Python interpreter root directory
pub const PYTHON_ROOT_VAR: &str = "PYTHON_BASE";

pub const DEFAULT_TRANSPILER: &str = "cython";
pub const DEFAULT_SOURCE_EXT: &str = "pyx";
pub const DEFAULT_CONFIGURATION: &str = "Debug";

/// Editor target that receives the generated modules
pub const EDITOR_TARGET: &str = "UE4Editor";

/// Name of the hand-written core module the bindings build into
pub const CORE_MODULE: &str = "UnrealPy";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} env var needs to point to the {what} root directory")]
    Missing { var: &'static str, what: &'static str },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub engine_root: PathBuf,
    pub python_root: PathBuf,
    /// Directory holding the `.pyx` sources and the `Modules/` templates
    pub project_dir: PathBuf,
    pub platform: &'static Platform,
    pub transpiler: String,
    /// Source file extension, without the dot
    pub source_ext: String,
    /// Editor build configuration (`Debug`, `Development`, ...)
    pub configuration: String,
}

impl Settings {
    /// Create settings from the two required roots.
    ///
    /// A missing or empty root is a configuration error.
    pub fn new(
        engine_root: Option<PathBuf>,
        python_root: Option<PathBuf>,
        platform: &'static Platform,
    ) -> Result<Self, ConfigError> {
        let engine_root = require(engine_root, ENGINE_ROOT_VAR, "UnrealEngine")?;
        let python_root = require(python_root, PYTHON_ROOT_VAR, "Python 2.7")?;

        Ok(Settings {
            engine_root,
            python_root,
            project_dir: PathBuf::from("."),
            platform,
            transpiler: DEFAULT_TRANSPILER.to_string(),
            source_ext: DEFAULT_SOURCE_EXT.to_string(),
            configuration: DEFAULT_CONFIGURATION.to_string(),
        })
    }

    /// Read both roots from the process environment and detect the host platform
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform = Platform::host()?;
        Self::new(
            std::env::var_os(ENGINE_ROOT_VAR).map(PathBuf::from),
            std::env::var_os(PYTHON_ROOT_VAR).map(PathBuf::from),
            platform,
        )
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    pub fn with_transpiler(mut self, transpiler: impl Into<String>) -> Self {
        self.transpiler = transpiler.into();
        self
    }

    pub fn with_source_ext(mut self, ext: impl Into<String>) -> Self {
        self.source_ext = ext.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    /// `Engine/Source/Editor`, where every editor module lives
    pub fn editor_source_dir(&self) -> PathBuf {
        self.engine_root.join("Engine").join("Source").join("Editor")
    }

    /// The shared target file that lists extra editor modules
    pub fn target_file(&self) -> PathBuf {
        self.engine_root
            .join("Engine")
            .join("Source")
            .join(format!("{}.Target.cs", EDITOR_TARGET))
    }

    /// Private source directory of the core module
    pub fn core_private_dir(&self) -> PathBuf {
        self.editor_source_dir().join(CORE_MODULE).join("Private")
    }

    /// Directory holding per-module `.Build.cs` templates
    pub fn templates_dir(&self) -> PathBuf {
        self.project_dir.join("Modules")
    }

    pub fn batch_files_dir(&self) -> PathBuf {
        self.engine_root.join("Engine").join("Build").join("BatchFiles")
    }

    pub fn binaries_dir(&self) -> PathBuf {
        self.engine_root
            .join("Engine")
            .join("Binaries")
            .join(self.platform.unreal_name)
    }

    pub fn python_include_dir(&self) -> PathBuf {
        self.python_root.join("include")
    }

    pub fn python_lib_dir(&self) -> PathBuf {
        self.python_root.join("lib")
    }

    /// Full path of the interpreter library linked into every module
    pub fn python_lib_file(&self) -> PathBuf {
        self.python_lib_dir().join(format!(
            "{}{}",
            self.platform.python_lib_name, self.platform.dynamic_library_ext
        ))
    }

    /// Project directory joined with a slash-separated relative path
    pub fn project_path(&self, relative: &str) -> PathBuf {
        join_slashed(&self.project_dir, relative)
    }
}

fn require(
    value: Option<PathBuf>,
    var: &'static str,
    what: &'static str,
) -> Result<PathBuf, ConfigError> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ConfigError::Missing { var, what })
}

/// Join `relative` (always `/`-separated) onto `base` component by component
pub(crate) fn join_slashed(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}

#[cfg(test)]
pub(crate) fn test_settings(root: &Path) -> Settings {
    Settings::new(
        Some(root.join("UnrealEngine")),
        Some(root.join("Python27")),
        &crate::platform::MAC,
    )
    .unwrap()
    .with_project_dir(root.join("project"))
}
